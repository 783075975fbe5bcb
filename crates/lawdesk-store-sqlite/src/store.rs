//! [`SqliteStore`]: the SQLite implementation of [`CaseStore`]. The
//! directory half lives in `directory.rs`.

use std::path::Path;

use rusqlite::OptionalExtension as _;

use lawdesk_core::{
  case::{Case, CaseKey, CaseUpdate, NewCase},
  error::require,
  party::{
    Accused, AccusedKey, AccusedUpdate, Complainant, ComplainantUpdate,
    NewAccused, NewComplainant, PartyQuery,
  },
  petition::{NewPetition, Petition, PetitionQuery},
  store::{CaseStore, Filing, FilingError},
  template::{Template, TemplateKey},
};

use crate::{
  Error, Result,
  encode::{
    ACCUSED_COLUMNS, CASE_COLUMNS, COMPLAINANT_COLUMNS, PETITION_COLUMNS,
    RawAccused, RawCase, RawComplainant, RawPetition, RawTemplate,
    TEMPLATE_COLUMNS, encode_dt, now,
  },
  ids::{
    ACCUSED_PREFIX, CASE_PREFIX, COMPLAINANT_PREFIX, next_sequential,
    petition_id,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lawdesk case store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  pub(crate) async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Shut down the background connection; later calls on any clone fail.
  #[cfg(test)]
  pub(crate) async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn case_exists(&self, case_id: String) -> Result<bool> {
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                "SELECT 1 FROM cases WHERE case_id = ?1",
                rusqlite::params![case_id],
                |_| Ok(()),
              )
              .optional()?
              .is_some(),
          )
        })
        .await?,
    )
  }
}

/// Which half of a filing transaction failed.
enum Stage {
  Complainant(rusqlite::Error),
  Petition(rusqlite::Error),
}

/// Body of [`CaseStore::file_petition`]; runs inside `tx`.
fn file_in(
  tx: &rusqlite::Transaction<'_>,
  input: &NewPetition,
  placeholder: &NewComplainant,
  petition_id: &str,
  at: &str,
) -> std::result::Result<(RawPetition, RawComplainant, bool), Stage> {
  let newest = tx
    .query_row(
      &format!(
        "SELECT {COMPLAINANT_COLUMNS} FROM complainants WHERE case_id = ?1
         ORDER BY created_on DESC, rowid DESC LIMIT 1"
      ),
      rusqlite::params![input.case_id],
      RawComplainant::from_row,
    )
    .optional()
    .map_err(Stage::Complainant)?;

  let (complainant, created) = match newest {
    Some(existing) => (existing, false),
    None => {
      let id = next_sequential(tx, "complainants", "complainant_id", COMPLAINANT_PREFIX)
        .map_err(Stage::Complainant)?;
      tx.execute(
        "INSERT INTO complainants (
           complainant_id, case_id, name, address, phone, email, created_by, created_on
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
          id,
          placeholder.case_id,
          placeholder.name,
          placeholder.address,
          placeholder.phone,
          placeholder.email,
          placeholder.created_by,
          at,
        ],
      )
      .map_err(Stage::Complainant)?;
      let raw = RawComplainant {
        complainant_id: id,
        case_id:        placeholder.case_id.clone(),
        name:           placeholder.name.clone(),
        address:        placeholder.address.clone(),
        phone:          placeholder.phone.clone(),
        email:          placeholder.email.clone(),
        created_by:     placeholder.created_by.clone(),
        created_on:     at.to_owned(),
      };
      (raw, true)
    }
  };

  tx.execute(
    "INSERT INTO petitions (
       petition_id, case_id, complainant_id, template_id, document_path, created_by, created_on
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    rusqlite::params![
      petition_id,
      input.case_id,
      complainant.complainant_id,
      input.template_id,
      input.document_path,
      input.created_by,
      at,
    ],
  )
  .map_err(Stage::Petition)?;

  let petition = RawPetition {
    petition_id:    petition_id.to_owned(),
    case_id:        input.case_id.clone(),
    complainant_id: complainant.complainant_id.clone(),
    template_id:    input.template_id.clone(),
    document_path:  input.document_path.clone(),
    created_by:     input.created_by.clone(),
    created_on:     at.to_owned(),
  };
  Ok((petition, complainant, created))
}

// ─── CaseStore impl ──────────────────────────────────────────────────────────

impl CaseStore for SqliteStore {
  type Error = Error;

  // ── Cases ─────────────────────────────────────────────────────────────────

  async fn create_case(&self, input: NewCase) -> Result<Case> {
    input.validate()?;
    let created_on = now();
    let at = encode_dt(created_on);
    let sc_no = input.sc_no.clone();
    let row = input.clone();

    let case_id = self
      .conn
      .call(move |conn| {
        let taken = conn
          .query_row(
            "SELECT 1 FROM cases WHERE sc_no = ?1",
            rusqlite::params![row.sc_no],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(None);
        }

        let id = next_sequential(conn, "cases", "case_id", CASE_PREFIX)?;
        conn.execute(
          &format!("INSERT INTO cases ({CASE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
          rusqlite::params![
            id,
            row.description,
            row.sc_no,
            row.court_name,
            row.case_type,
            row.court_city,
            row.court_state,
            row.created_by,
            at,
          ],
        )?;
        Ok(Some(id))
      })
      .await?
      .ok_or(Error::DuplicateFilingNumber(sc_no))?;

    tracing::debug!(%case_id, "created case");
    Ok(Case {
      case_id,
      description: input.description,
      sc_no: input.sc_no,
      court_name: input.court_name,
      case_type: input.case_type,
      court_city: input.court_city,
      court_state: input.court_state,
      created_by: input.created_by,
      created_on,
    })
  }

  async fn find_case(&self, key: &CaseKey) -> Result<Option<Case>> {
    let column = match key {
      CaseKey::Id(_) => "case_id",
      CaseKey::FilingNumber(_) => "sc_no",
    };
    let value = key.as_str().to_owned();

    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CASE_COLUMNS} FROM cases WHERE {column} = ?1"),
              rusqlite::params![value],
              RawCase::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCase::into_case).transpose()
  }

  async fn list_cases(&self, created_by: Option<String>) -> Result<Vec<Case>> {
    let raws: Vec<RawCase> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CASE_COLUMNS} FROM cases
           WHERE (?1 IS NULL OR created_by = ?1)
           ORDER BY created_on DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![created_by], RawCase::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCase::into_case).collect()
  }

  async fn update_case(&self, case_id: String, update: CaseUpdate) -> Result<Option<Case>> {
    if let Some(description) = &update.description {
      require("description", Some(description))?;
    }
    if let Some(sc_no) = &update.sc_no {
      require("scNo", Some(sc_no))?;
    }

    let outcome: Result<Option<RawCase>> = self
      .conn
      .call(move |conn| {
        if let Some(sc_no) = &update.sc_no {
          let taken = conn
            .query_row(
              "SELECT 1 FROM cases WHERE sc_no = ?1 AND case_id != ?2",
              rusqlite::params![sc_no, case_id],
              |_| Ok(()),
            )
            .optional()?
            .is_some();
          if taken {
            return Ok(Err(Error::DuplicateFilingNumber(sc_no.clone())));
          }
        }

        let changed = conn.execute(
          "UPDATE cases SET
             description = COALESCE(?2, description),
             sc_no       = COALESCE(?3, sc_no),
             court_name  = COALESCE(?4, court_name),
             case_type   = COALESCE(?5, case_type),
             court_city  = COALESCE(?6, court_city),
             court_state = COALESCE(?7, court_state),
             created_by  = COALESCE(?8, created_by)
           WHERE case_id = ?1",
          rusqlite::params![
            case_id,
            update.description,
            update.sc_no,
            update.court_name,
            update.case_type,
            update.court_city,
            update.court_state,
            update.created_by,
          ],
        )?;
        if changed == 0 {
          return Ok(Ok(None));
        }

        let raw = conn.query_row(
          &format!("SELECT {CASE_COLUMNS} FROM cases WHERE case_id = ?1"),
          rusqlite::params![case_id],
          RawCase::from_row,
        )?;
        Ok(Ok(Some(raw)))
      })
      .await?;

    outcome?.map(RawCase::into_case).transpose()
  }

  async fn delete_case(&self, case_id: String) -> Result<Option<Case>> {
    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = tx
          .query_row(
            &format!("SELECT {CASE_COLUMNS} FROM cases WHERE case_id = ?1"),
            rusqlite::params![case_id],
            RawCase::from_row,
          )
          .optional()?;
        if raw.is_some() {
          tx.execute("DELETE FROM cases WHERE case_id = ?1", rusqlite::params![case_id])?;
        }
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawCase::into_case).transpose()
  }

  // ── Accused ───────────────────────────────────────────────────────────────

  async fn add_accused(&self, input: NewAccused) -> Result<Accused> {
    input.validate()?;
    if !self.case_exists(input.case_id.clone()).await? {
      return Err(Error::CaseNotFound(input.case_id));
    }

    let created_on = now();
    let at = encode_dt(created_on);
    let row = input.clone();

    let accused_id = self
      .conn
      .call(move |conn| {
        let id = next_sequential(conn, "accused", "accused_id", ACCUSED_PREFIX)?;
        conn.execute(
          &format!("INSERT INTO accused ({ACCUSED_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
          rusqlite::params![
            id,
            row.case_id,
            row.name,
            row.phone,
            row.email,
            row.address,
            row.accused_no,
            row.signature_path,
            row.created_by,
            at,
          ],
        )?;
        Ok(id)
      })
      .await?;

    Ok(Accused {
      accused_id,
      case_id: input.case_id,
      name: input.name,
      phone: input.phone,
      email: input.email,
      address: input.address,
      accused_no: input.accused_no,
      signature_path: input.signature_path,
      created_by: input.created_by,
      created_on,
    })
  }

  async fn find_accused(&self, key: &AccusedKey) -> Result<Option<Accused>> {
    let (column, value) = match key {
      AccusedKey::Id(id) => ("accused_id", id.clone()),
      AccusedKey::Number(no) => ("accused_no", no.clone()),
    };

    let raw: Option<RawAccused> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ACCUSED_COLUMNS} FROM accused WHERE {column} = ?1
                 ORDER BY created_on DESC, rowid DESC LIMIT 1"
              ),
              rusqlite::params![value],
              RawAccused::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAccused::into_accused).transpose()
  }

  async fn list_accused(&self, query: PartyQuery) -> Result<Vec<Accused>> {
    let raws: Vec<RawAccused> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ACCUSED_COLUMNS} FROM accused
           WHERE (?1 IS NULL OR case_id = ?1) AND (?2 IS NULL OR created_by = ?2)
           ORDER BY created_on DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![query.case_id, query.created_by],
            RawAccused::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAccused::into_accused).collect()
  }

  async fn update_accused(
    &self,
    accused_id: String,
    update: AccusedUpdate,
  ) -> Result<Option<Accused>> {
    if let Some(name) = &update.name {
      require("name", Some(name))?;
    }

    let raw: Option<RawAccused> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE accused SET
             name           = COALESCE(?2, name),
             phone          = COALESCE(?3, phone),
             email          = COALESCE(?4, email),
             address        = COALESCE(?5, address),
             accused_no     = COALESCE(?6, accused_no),
             signature_path = COALESCE(?7, signature_path)
           WHERE accused_id = ?1",
          rusqlite::params![
            accused_id,
            update.name,
            update.phone,
            update.email,
            update.address,
            update.accused_no,
            update.signature_path,
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(Some(conn.query_row(
          &format!("SELECT {ACCUSED_COLUMNS} FROM accused WHERE accused_id = ?1"),
          rusqlite::params![accused_id],
          RawAccused::from_row,
        )?))
      })
      .await?;

    raw.map(RawAccused::into_accused).transpose()
  }

  async fn delete_accused(&self, accused_id: String) -> Result<Option<Accused>> {
    let raw: Option<RawAccused> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            &format!("SELECT {ACCUSED_COLUMNS} FROM accused WHERE accused_id = ?1"),
            rusqlite::params![accused_id],
            RawAccused::from_row,
          )
          .optional()?;
        if raw.is_some() {
          conn.execute("DELETE FROM accused WHERE accused_id = ?1", rusqlite::params![accused_id])?;
        }
        Ok(raw)
      })
      .await?;

    raw.map(RawAccused::into_accused).transpose()
  }

  // ── Complainants ──────────────────────────────────────────────────────────

  async fn add_complainant(&self, input: NewComplainant) -> Result<Complainant> {
    input.validate()?;
    if !self.case_exists(input.case_id.clone()).await? {
      return Err(Error::CaseNotFound(input.case_id));
    }

    let created_on = now();
    let at = encode_dt(created_on);
    let row = input.clone();

    let complainant_id = self
      .conn
      .call(move |conn| {
        let id = next_sequential(conn, "complainants", "complainant_id", COMPLAINANT_PREFIX)?;
        conn.execute(
          &format!("INSERT INTO complainants ({COMPLAINANT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
          rusqlite::params![
            id,
            row.case_id,
            row.name,
            row.address,
            row.phone,
            row.email,
            row.created_by,
            at,
          ],
        )?;
        Ok(id)
      })
      .await?;

    Ok(Complainant {
      complainant_id,
      case_id: input.case_id,
      name: input.name,
      address: input.address,
      phone: input.phone,
      email: input.email,
      created_by: input.created_by,
      created_on,
    })
  }

  async fn get_complainant(&self, complainant_id: String) -> Result<Option<Complainant>> {
    let raw: Option<RawComplainant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COMPLAINANT_COLUMNS} FROM complainants WHERE complainant_id = ?1"),
              rusqlite::params![complainant_id],
              RawComplainant::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawComplainant::into_complainant).transpose()
  }

  async fn list_complainants(&self, query: PartyQuery) -> Result<Vec<Complainant>> {
    let raws: Vec<RawComplainant> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COMPLAINANT_COLUMNS} FROM complainants
           WHERE (?1 IS NULL OR case_id = ?1) AND (?2 IS NULL OR created_by = ?2)
           ORDER BY created_on DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![query.case_id, query.created_by],
            RawComplainant::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComplainant::into_complainant).collect()
  }

  async fn update_complainant(
    &self,
    complainant_id: String,
    update: ComplainantUpdate,
  ) -> Result<Option<Complainant>> {
    if let Some(name) = &update.name {
      require("name", Some(name))?;
    }

    let raw: Option<RawComplainant> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE complainants SET
             name    = COALESCE(?2, name),
             address = COALESCE(?3, address),
             phone   = COALESCE(?4, phone),
             email   = COALESCE(?5, email)
           WHERE complainant_id = ?1",
          rusqlite::params![
            complainant_id,
            update.name,
            update.address,
            update.phone,
            update.email,
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(Some(conn.query_row(
          &format!("SELECT {COMPLAINANT_COLUMNS} FROM complainants WHERE complainant_id = ?1"),
          rusqlite::params![complainant_id],
          RawComplainant::from_row,
        )?))
      })
      .await?;

    raw.map(RawComplainant::into_complainant).transpose()
  }

  /// Refused with [`Error::ComplainantInUse`] while petitions still name the
  /// complainant; delete those petitions (or the whole case) first.
  async fn delete_complainant(&self, complainant_id: String) -> Result<Option<Complainant>> {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(raw) = tx
          .query_row(
            &format!("SELECT {COMPLAINANT_COLUMNS} FROM complainants WHERE complainant_id = ?1"),
            rusqlite::params![complainant_id],
            RawComplainant::from_row,
          )
          .optional()?
        else {
          return Ok(Ok(None));
        };
        let petitions: i64 = tx.query_row(
          "SELECT COUNT(*) FROM petitions WHERE complainant_id = ?1",
          rusqlite::params![complainant_id],
          |row| row.get(0),
        )?;
        if petitions > 0 {
          return Ok(Err(Error::ComplainantInUse { complainant_id, petitions }));
        }
        tx.execute(
          "DELETE FROM complainants WHERE complainant_id = ?1",
          rusqlite::params![complainant_id],
        )?;
        tx.commit()?;
        Ok(Ok(Some(raw)))
      })
      .await?;

    outcome?.map(RawComplainant::into_complainant).transpose()
  }

  // ── Templates ─────────────────────────────────────────────────────────────

  async fn list_templates(&self) -> Result<Vec<Template>> {
    let raws: Vec<RawTemplate> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TEMPLATE_COLUMNS} FROM templates
           ORDER BY CAST(template_id AS INTEGER), template_id"
        ))?;
        let rows = stmt
          .query_map([], RawTemplate::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTemplate::into_template).collect()
  }

  async fn find_template(&self, key: &TemplateKey) -> Result<Option<Template>> {
    let (column, value) = match key {
      TemplateKey::Id(id) => ("template_id", id.clone()),
      TemplateKey::Code(code) => ("template_code", code.clone()),
    };

    let raw: Option<RawTemplate> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE {column} = ?1"),
              rusqlite::params![value],
              RawTemplate::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawTemplate::into_template).transpose()
  }

  // ── Petitions ─────────────────────────────────────────────────────────────

  async fn file_petition(
    &self,
    input: NewPetition,
    placeholder: NewComplainant,
  ) -> Result<Filing, FilingError<Error>> {
    let created_on = now();
    let at = encode_dt(created_on);
    let id = petition_id(created_on);

    let staged = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let staged = match file_in(&tx, &input, &placeholder, &id, &at) {
          Ok(filed) => tx.commit().map(|()| filed).map_err(Stage::Petition),
          Err(stage) => Err(stage),
        };
        Ok(staged)
      })
      .await
      .map_err(|e| FilingError::Petition(Error::Database(e)))?;

    let (petition, complainant, complainant_created) = staged.map_err(|stage| match stage {
      Stage::Complainant(e) => FilingError::Complainant(Error::Sqlite(e)),
      Stage::Petition(e) => FilingError::Petition(Error::Sqlite(e)),
    })?;

    Ok(Filing {
      complainant: complainant.into_complainant().map_err(FilingError::Complainant)?,
      petition: petition.into_petition().map_err(FilingError::Petition)?,
      complainant_created,
    })
  }

  async fn get_petition(&self, petition_id: String) -> Result<Option<Petition>> {
    let raw: Option<RawPetition> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PETITION_COLUMNS} FROM petitions WHERE petition_id = ?1"),
              rusqlite::params![petition_id],
              RawPetition::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPetition::into_petition).transpose()
  }

  async fn list_petitions(&self, query: PetitionQuery) -> Result<Vec<Petition>> {
    let raws: Vec<RawPetition> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PETITION_COLUMNS} FROM petitions
           WHERE (?1 IS NULL OR case_id = ?1) AND (?2 IS NULL OR created_by = ?2)
           ORDER BY created_on DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![query.case_id, query.created_by],
            RawPetition::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPetition::into_petition).collect()
  }

  async fn update_document_path(
    &self,
    petition_id: String,
    document_path: Option<String>,
  ) -> Result<Option<Petition>> {
    let raw: Option<RawPetition> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE petitions SET document_path = ?2 WHERE petition_id = ?1",
          rusqlite::params![petition_id, document_path],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(Some(conn.query_row(
          &format!("SELECT {PETITION_COLUMNS} FROM petitions WHERE petition_id = ?1"),
          rusqlite::params![petition_id],
          RawPetition::from_row,
        )?))
      })
      .await?;

    raw.map(RawPetition::into_petition).transpose()
  }

  async fn delete_petition(&self, petition_id: String) -> Result<Option<Petition>> {
    let raw: Option<RawPetition> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            &format!("SELECT {PETITION_COLUMNS} FROM petitions WHERE petition_id = ?1"),
            rusqlite::params![petition_id],
            RawPetition::from_row,
          )
          .optional()?;
        if raw.is_some() {
          conn.execute("DELETE FROM petitions WHERE petition_id = ?1", rusqlite::params![petition_id])?;
        }
        Ok(raw)
      })
      .await?;

    raw.map(RawPetition::into_petition).transpose()
  }
}
