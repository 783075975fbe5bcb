//! [`DirectoryStore`] for [`SqliteStore`]: law firms and advocates.

use rusqlite::OptionalExtension as _;

use lawdesk_core::{
  directory::{
    Advocate, AdvocateStatus, AdvocateUpdate, FirmRoster, LawFirm, NewAdvocate,
    NewLawFirm,
  },
  store::DirectoryStore,
};

use crate::{
  Error, Result, SqliteStore,
  encode::{
    ADVOCATE_COLUMNS, LAW_FIRM_COLUMNS, RawAdvocate, RawLawFirm, encode_dt, now,
  },
  ids::{ADVOCATE_PREFIX, LAW_FIRM_PREFIX, next_sequential},
};

/// `None` for an absent or blank search term.
fn search_term(search: Option<String>) -> Option<String> {
  search
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
}

fn firm_exists(conn: &rusqlite::Connection, firm_id: &str) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM law_firms WHERE firm_id = ?1",
        rusqlite::params![firm_id],
        |_| Ok(()),
      )
      .optional()?
      .is_some(),
  )
}

/// Whether `email` belongs to an advocate other than `except`.
fn email_taken(
  conn: &rusqlite::Connection,
  email: &str,
  except: Option<&str>,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM advocates
         WHERE email = ?1 COLLATE NOCASE AND (?2 IS NULL OR advocate_id != ?2)",
        rusqlite::params![email, except],
        |_| Ok(()),
      )
      .optional()?
      .is_some(),
  )
}

fn select_advocate(
  conn: &rusqlite::Connection,
  advocate_id: &str,
) -> rusqlite::Result<Option<RawAdvocate>> {
  conn
    .query_row(
      &format!("SELECT {ADVOCATE_COLUMNS} FROM advocates WHERE advocate_id = ?1"),
      rusqlite::params![advocate_id],
      RawAdvocate::from_row,
    )
    .optional()
}

impl DirectoryStore for SqliteStore {
  // ── Law firms ─────────────────────────────────────────────────────────────

  async fn create_law_firm(&self, input: NewLawFirm) -> Result<LawFirm> {
    input.validate()?;
    let created_on = now();
    let at = encode_dt(created_on);
    let name = input.name.clone();
    let row = input.clone();

    let firm_id = self
      .conn
      .call(move |conn| {
        let taken = conn
          .query_row(
            "SELECT 1 FROM law_firms WHERE name = ?1 COLLATE NOCASE",
            rusqlite::params![row.name],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(None);
        }

        let id = next_sequential(conn, "law_firms", "firm_id", LAW_FIRM_PREFIX)?;
        conn.execute(
          &format!("INSERT INTO law_firms ({LAW_FIRM_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
          rusqlite::params![
            id,
            row.name,
            row.designation,
            row.address,
            row.phone,
            row.email,
            row.created_by,
            at,
          ],
        )?;
        Ok(Some(id))
      })
      .await?
      .ok_or(Error::DuplicateFirmName(name))?;

    tracing::debug!(%firm_id, "created law firm");
    Ok(LawFirm {
      firm_id,
      name: input.name,
      designation: input.designation,
      address: input.address,
      phone: input.phone,
      email: input.email,
      created_by: input.created_by,
      created_on,
    })
  }

  async fn list_law_firms(&self, search: Option<String>) -> Result<Vec<LawFirm>> {
    let search = search_term(search);
    let raws: Vec<RawLawFirm> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LAW_FIRM_COLUMNS} FROM law_firms
           WHERE (?1 IS NULL OR name LIKE '%' || ?1 || '%')
           ORDER BY name COLLATE NOCASE, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![search], RawLawFirm::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLawFirm::into_law_firm).collect()
  }

  async fn get_law_firm(&self, firm_id: String) -> Result<Option<LawFirm>> {
    let raw: Option<RawLawFirm> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {LAW_FIRM_COLUMNS} FROM law_firms WHERE firm_id = ?1"),
              rusqlite::params![firm_id],
              RawLawFirm::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLawFirm::into_law_firm).transpose()
  }

  async fn delete_law_firm(&self, firm_id: String) -> Result<Option<LawFirm>> {
    let raw: Option<RawLawFirm> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = tx
          .query_row(
            &format!("SELECT {LAW_FIRM_COLUMNS} FROM law_firms WHERE firm_id = ?1"),
            rusqlite::params![firm_id],
            RawLawFirm::from_row,
          )
          .optional()?;
        if raw.is_some() {
          tx.execute("DELETE FROM law_firms WHERE firm_id = ?1", rusqlite::params![firm_id])?;
        }
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawLawFirm::into_law_firm).transpose()
  }

  async fn firm_rosters(&self, firm_name: Option<String>) -> Result<Vec<FirmRoster>> {
    let firm_name = search_term(firm_name);
    let raws: Vec<(RawLawFirm, Vec<RawAdvocate>)> = self
      .conn
      .call(move |conn| {
        let mut firm_stmt = conn.prepare(&format!(
          "SELECT {LAW_FIRM_COLUMNS} FROM law_firms
           WHERE (?1 IS NULL OR name LIKE '%' || ?1 || '%')
           ORDER BY name COLLATE NOCASE, rowid"
        ))?;
        let mut member_stmt = conn.prepare(&format!(
          "SELECT {ADVOCATE_COLUMNS} FROM advocates
           WHERE firm_id = ?1
           ORDER BY name COLLATE NOCASE, rowid"
        ))?;

        let firms = firm_stmt
          .query_map(rusqlite::params![firm_name], RawLawFirm::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        let mut rosters = Vec::with_capacity(firms.len());
        for firm in firms {
          let advocates = member_stmt
            .query_map(rusqlite::params![firm.firm_id], RawAdvocate::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          rosters.push((firm, advocates));
        }
        Ok(rosters)
      })
      .await?;

    raws
      .into_iter()
      .map(|(firm, advocates)| {
        let advocates = advocates
          .into_iter()
          .map(RawAdvocate::into_advocate)
          .collect::<Result<Vec<_>>>()?;
        Ok(FirmRoster::new(firm.into_law_firm()?, advocates))
      })
      .collect()
  }

  // ── Advocates ─────────────────────────────────────────────────────────────

  async fn add_advocate(&self, input: NewAdvocate) -> Result<Advocate> {
    input.validate()?;
    let created_on = now();
    let at = encode_dt(created_on);
    let status = AdvocateStatus::default();
    let row = input.clone();

    let outcome: Result<String> = self
      .conn
      .call(move |conn| {
        if let Some(firm_id) = &row.firm_id
          && !firm_exists(conn, firm_id)?
        {
          return Ok(Err(Error::FirmNotFound(firm_id.clone())));
        }
        if email_taken(conn, &row.email, None)? {
          return Ok(Err(Error::DuplicateAdvocateEmail(row.email)));
        }

        let id = next_sequential(conn, "advocates", "advocate_id", ADVOCATE_PREFIX)?;
        conn.execute(
          &format!(
            "INSERT INTO advocates ({ADVOCATE_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9)"
          ),
          rusqlite::params![
            id,
            row.name,
            row.email,
            row.phone,
            row.address,
            row.firm_id,
            status.as_str(),
            row.created_by,
            at,
          ],
        )?;
        Ok(Ok(id))
      })
      .await?;
    let advocate_id = outcome?;

    tracing::debug!(%advocate_id, "added advocate");
    Ok(Advocate {
      advocate_id,
      name: input.name,
      email: input.email,
      phone: input.phone,
      address: input.address,
      firm_id: input.firm_id,
      status,
      email_verified: false,
      created_by: input.created_by,
      created_on,
    })
  }

  async fn list_advocates(&self, search: Option<String>) -> Result<Vec<Advocate>> {
    let search = search_term(search);
    let raws: Vec<RawAdvocate> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ADVOCATE_COLUMNS} FROM advocates
           WHERE ?1 IS NULL
              OR name  LIKE '%' || ?1 || '%'
              OR email LIKE '%' || ?1 || '%'
              OR phone LIKE '%' || ?1 || '%'
           ORDER BY name COLLATE NOCASE, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![search], RawAdvocate::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAdvocate::into_advocate).collect()
  }

  async fn get_advocate(&self, advocate_id: String) -> Result<Option<Advocate>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_advocate(conn, &advocate_id)?))
      .await?;

    raw.map(RawAdvocate::into_advocate).transpose()
  }

  async fn update_advocate(
    &self,
    advocate_id: String,
    update: AdvocateUpdate,
  ) -> Result<Option<Advocate>> {
    update.validate()?;

    let outcome: Result<Option<RawAdvocate>> = self
      .conn
      .call(move |conn| {
        if let Some(firm_id) = &update.firm_id
          && !firm_exists(conn, firm_id)?
        {
          return Ok(Err(Error::FirmNotFound(firm_id.clone())));
        }
        if let Some(email) = &update.email
          && email_taken(conn, email, Some(advocate_id.as_str()))?
        {
          return Ok(Err(Error::DuplicateAdvocateEmail(email.clone())));
        }

        let changed = conn.execute(
          "UPDATE advocates SET
             name    = COALESCE(?2, name),
             email   = COALESCE(?3, email),
             phone   = COALESCE(?4, phone),
             address = COALESCE(?5, address),
             firm_id = COALESCE(?6, firm_id)
           WHERE advocate_id = ?1",
          rusqlite::params![
            advocate_id,
            update.name,
            update.email,
            update.phone,
            update.address,
            update.firm_id,
          ],
        )?;
        if changed == 0 {
          return Ok(Ok(None));
        }
        Ok(Ok(select_advocate(conn, &advocate_id)?))
      })
      .await?;

    outcome?.map(RawAdvocate::into_advocate).transpose()
  }

  async fn set_advocate_status(
    &self,
    advocate_id: String,
    status: AdvocateStatus,
  ) -> Result<Option<Advocate>> {
    let raw = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE advocates SET status = ?2 WHERE advocate_id = ?1",
          rusqlite::params![advocate_id, status.as_str()],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(select_advocate(conn, &advocate_id)?)
      })
      .await?;

    raw.map(RawAdvocate::into_advocate).transpose()
  }

  async fn delete_advocate(&self, advocate_id: String) -> Result<Option<Advocate>> {
    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = select_advocate(&tx, &advocate_id)?;
        if raw.is_some() {
          tx.execute(
            "DELETE FROM advocates WHERE advocate_id = ?1",
            rusqlite::params![advocate_id],
          )?;
        }
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawAdvocate::into_advocate).transpose()
  }
}
