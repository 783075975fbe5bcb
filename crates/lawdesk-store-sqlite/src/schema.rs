//! SQL schema for the lawdesk SQLite store.
//!
//! Executed on every connection open; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS` and `INSERT OR IGNORE`.

/// Full schema DDL plus the seeded production templates.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS cases (
    case_id      TEXT PRIMARY KEY,          -- CASE001
    description  TEXT NOT NULL,
    sc_no        TEXT NOT NULL UNIQUE,      -- court filing number
    court_name   TEXT,
    case_type    TEXT,
    court_city   TEXT,
    court_state  TEXT,
    created_by   TEXT,
    created_on   TEXT NOT NULL              -- RFC 3339, microseconds, UTC
);

CREATE TABLE IF NOT EXISTS accused (
    accused_id     TEXT PRIMARY KEY,        -- CA001
    case_id        TEXT NOT NULL REFERENCES cases(case_id) ON DELETE CASCADE,
    name           TEXT NOT NULL,
    phone          TEXT,
    email          TEXT,
    address        TEXT,
    accused_no     TEXT,                    -- ordinal label, e.g. A1
    signature_path TEXT,
    created_by     TEXT,
    created_on     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS complainants (
    complainant_id TEXT PRIMARY KEY,        -- CC001
    case_id        TEXT NOT NULL REFERENCES cases(case_id) ON DELETE CASCADE,
    name           TEXT NOT NULL,
    address        TEXT,
    phone          TEXT,
    email          TEXT,
    created_by     TEXT,
    created_on     TEXT NOT NULL
);

-- Read-only reference data.
CREATE TABLE IF NOT EXISTS templates (
    template_id   TEXT PRIMARY KEY,
    template_code TEXT NOT NULL UNIQUE,
    template_name TEXT NOT NULL,
    questions     TEXT NOT NULL DEFAULT '[]', -- JSON array of questions
    created_on    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS petitions (
    petition_id    TEXT PRIMARY KEY,        -- CP_<millis>_<random>
    case_id        TEXT NOT NULL REFERENCES cases(case_id) ON DELETE CASCADE,
    complainant_id TEXT NOT NULL REFERENCES complainants(complainant_id),
    template_id    TEXT NOT NULL REFERENCES templates(template_id),
    document_path  TEXT,                    -- relative to the artifacts root
    created_by     TEXT,
    created_on     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS law_firms (
    firm_id      TEXT PRIMARY KEY,          -- LF001
    name         TEXT NOT NULL,
    designation  TEXT,
    address      TEXT,
    phone        TEXT,
    email        TEXT,
    created_by   TEXT,
    created_on   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS advocates (
    advocate_id    TEXT PRIMARY KEY,        -- ADV001
    name           TEXT NOT NULL,
    email          TEXT NOT NULL,
    phone          TEXT,
    address        TEXT,
    firm_id        TEXT REFERENCES law_firms(firm_id) ON DELETE SET NULL,
    status         TEXT NOT NULL DEFAULT 'Pending', -- Pending | Active | Inactive
    email_verified INTEGER NOT NULL DEFAULT 0,
    created_by     TEXT,
    created_on     TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS law_firms_name_idx  ON law_firms(name COLLATE NOCASE);
CREATE UNIQUE INDEX IF NOT EXISTS advocates_email_idx ON advocates(email COLLATE NOCASE);
CREATE INDEX IF NOT EXISTS advocates_firm_idx         ON advocates(firm_id);
CREATE INDEX IF NOT EXISTS accused_case_idx      ON accused(case_id);
CREATE INDEX IF NOT EXISTS complainants_case_idx ON complainants(case_id);
CREATE INDEX IF NOT EXISTS petitions_case_idx    ON petitions(case_id);

INSERT OR IGNORE INTO templates (template_id, template_code, template_name, questions, created_on)
VALUES (
    '1', 'TEMP-001', 'Petition',
    '[
      {\"questionId\":\"court_name\",\"questionText\":\"Court name\",\"questionType\":\"text\",\"isRequired\":false,\"placeholder\":\"COIMBATORE\"},
      {\"questionId\":\"section_number\",\"questionText\":\"Section number\",\"questionType\":\"text\",\"isRequired\":false,\"placeholder\":\"355(1)\"},
      {\"questionId\":\"respondent_station\",\"questionText\":\"Police station\",\"questionType\":\"text\",\"isRequired\":true,\"placeholder\":\"PERIYANAIKENPALAYAM POLICE STATION\"},
      {\"questionId\":\"respondent_address\",\"questionText\":\"Respondent address\",\"questionType\":\"textarea\",\"isRequired\":false,\"placeholder\":\"Coimbatore.\"},
      {\"questionId\":\"selected_accused_ids\",\"questionText\":\"Accused named in this petition\",\"questionType\":\"multi_select\",\"isRequired\":false,\"placeholder\":\"\"},
      {\"questionId\":\"petition_points\",\"questionText\":\"Grounds of the petition\",\"questionType\":\"textarea\",\"isRequired\":true,\"placeholder\":\"One ground per entry\"},
      {\"questionId\":\"prayer\",\"questionText\":\"Prayer\",\"questionType\":\"textarea\",\"isRequired\":true,\"placeholder\":\"\"},
      {\"questionId\":\"hearing_date\",\"questionText\":\"Hearing date\",\"questionType\":\"date\",\"isRequired\":false,\"placeholder\":\"dd/mm/yyyy\"},
      {\"questionId\":\"num_accused\",\"questionText\":\"Number of accused\",\"questionType\":\"number\",\"isRequired\":false,\"placeholder\":\"1\"},
      {\"questionId\":\"reason_accused\",\"questionText\":\"Reason (all accused)\",\"questionType\":\"textarea\",\"isRequired\":false,\"placeholder\":\"\"},
      {\"questionId\":\"advocate_name\",\"questionText\":\"Advocate name\",\"questionType\":\"text\",\"isRequired\":true,\"placeholder\":\"\"},
      {\"questionId\":\"place\",\"questionText\":\"Place\",\"questionType\":\"text\",\"isRequired\":false,\"placeholder\":\"Coimbatore\"}
    ]',
    '2024-01-01T00:00:00.000000Z'
);

INSERT OR IGNORE INTO templates (template_id, template_code, template_name, questions, created_on)
VALUES (
    '2', 'TEMP-002', 'Vakalathnama',
    '[
      {\"questionId\":\"court_full_name\",\"questionText\":\"Full name of the court\",\"questionType\":\"text\",\"isRequired\":true,\"placeholder\":\"\"},
      {\"questionId\":\"tribunal_location\",\"questionText\":\"Tribunal location\",\"questionType\":\"text\",\"isRequired\":false,\"placeholder\":\"COIMBATORE\"},
      {\"questionId\":\"oa_number\",\"questionText\":\"O.A. number\",\"questionType\":\"text\",\"isRequired\":false,\"placeholder\":\"182\"},
      {\"questionId\":\"oa_year\",\"questionText\":\"O.A. year\",\"questionType\":\"number\",\"isRequired\":false,\"placeholder\":\"\"},
      {\"questionId\":\"applicant_name\",\"questionText\":\"Applicant\",\"questionType\":\"text\",\"isRequired\":true,\"placeholder\":\"\"},
      {\"questionId\":\"applicant_branch\",\"questionText\":\"Applicant branch\",\"questionType\":\"text\",\"isRequired\":false,\"placeholder\":\"\"},
      {\"questionId\":\"applicant_address\",\"questionText\":\"Applicant address\",\"questionType\":\"textarea\",\"isRequired\":false,\"placeholder\":\"\"},
      {\"questionId\":\"selected_accused_ids\",\"questionText\":\"Defendants\",\"questionType\":\"multi_select\",\"isRequired\":false,\"placeholder\":\"\"},
      {\"questionId\":\"advocate_name\",\"questionText\":\"Advocate name\",\"questionType\":\"text\",\"isRequired\":true,\"placeholder\":\"\"},
      {\"questionId\":\"advocate_enrollment\",\"questionText\":\"Enrollment number\",\"questionType\":\"text\",\"isRequired\":false,\"placeholder\":\"\"},
      {\"questionId\":\"advocates_list\",\"questionText\":\"Advocates appointed\",\"questionType\":\"textarea\",\"isRequired\":false,\"placeholder\":\"\"},
      {\"questionId\":\"execution_day\",\"questionText\":\"Day of execution\",\"questionType\":\"text\",\"isRequired\":false,\"placeholder\":\"\"}
    ]',
    '2024-01-01T00:00:00.000000Z'
);

PRAGMA user_version = 1;
";
