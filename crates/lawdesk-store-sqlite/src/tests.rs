//! Integration tests for `SqliteStore` against an in-memory database.

use lawdesk_core::{
  case::{CaseKey, CaseUpdate, NewCase},
  directory::{AdvocateStatus, AdvocateUpdate, NewAdvocate, NewLawFirm},
  party::{AccusedKey, AccusedUpdate, NewAccused, NewComplainant, PartyQuery},
  petition::{NewPetition, PetitionQuery},
  store::{CaseStore, DirectoryStore, FilingError},
  template::{QuestionKind, RenderCode, TemplateKey},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_case(sc_no: &str) -> NewCase {
  NewCase {
    description: "Theft of a motorcycle".into(),
    sc_no: sc_no.into(),
    court_name: Some("Principal Sessions Court".into()),
    created_by: Some("adv-1".into()),
    ..Default::default()
  }
}

fn new_accused(case_id: &str, name: &str, no: &str) -> NewAccused {
  NewAccused {
    case_id: case_id.into(),
    name: name.into(),
    accused_no: Some(no.into()),
    ..Default::default()
  }
}

fn petition_for(case_id: &str, template_id: &str) -> NewPetition {
  NewPetition {
    case_id:       case_id.into(),
    template_id:   template_id.into(),
    document_path: None,
    created_by:    Some("adv-1".into()),
  }
}

// ─── Cases ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn case_ids_are_sequential() {
  let s = store().await;
  let a = s.create_case(new_case("SC/1/2024")).await.unwrap();
  let b = s.create_case(new_case("SC/2/2024")).await.unwrap();
  assert_eq!(a.case_id, "CASE001");
  assert_eq!(b.case_id, "CASE002");

  s.delete_case(b.case_id).await.unwrap();
  let c = s.create_case(new_case("SC/3/2024")).await.unwrap();
  assert_eq!(c.case_id, "CASE002");
}

#[tokio::test]
async fn duplicate_filing_number_is_rejected() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  let err = s.create_case(new_case("SC/1/2024")).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateFilingNumber(n) if n == "SC/1/2024"));
  assert_eq!(s.list_cases(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn blank_description_is_a_core_error() {
  let s = store().await;
  let err = s
    .create_case(NewCase { description: " ".into(), ..new_case("SC/1/2024") })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(_)));
}

#[tokio::test]
async fn find_case_by_id_or_filing_number() {
  let s = store().await;
  let created = s.create_case(new_case("SC/77/2024")).await.unwrap();

  let by_id = s.find_case(&CaseKey::Id("CASE001".into())).await.unwrap().unwrap();
  let by_no = s
    .find_case(&CaseKey::FilingNumber("SC/77/2024".into()))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(by_id, created);
  assert_eq!(by_no, created);
  assert!(s.find_case(&CaseKey::Id("SC/77/2024".into())).await.unwrap().is_none());
}

#[tokio::test]
async fn list_cases_newest_first_and_filtered() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  s.create_case(NewCase { created_by: Some("adv-2".into()), ..new_case("SC/2/2024") })
    .await
    .unwrap();
  s.create_case(new_case("SC/3/2024")).await.unwrap();

  let all = s.list_cases(None).await.unwrap();
  let ids: Vec<_> = all.iter().map(|c| c.case_id.as_str()).collect();
  assert_eq!(ids, ["CASE003", "CASE002", "CASE001"]);

  let mine = s.list_cases(Some("adv-2".into())).await.unwrap();
  assert_eq!(mine.len(), 1);
  assert_eq!(mine[0].sc_no, "SC/2/2024");
}

#[tokio::test]
async fn update_case_merges_fields_and_guards_filing_number() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  s.create_case(new_case("SC/2/2024")).await.unwrap();

  let updated = s
    .update_case(
      "CASE001".into(),
      CaseUpdate { court_city: Some("Coimbatore".into()), ..Default::default() },
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.court_city.as_deref(), Some("Coimbatore"));
  assert_eq!(updated.sc_no, "SC/1/2024");

  let err = s
    .update_case(
      "CASE001".into(),
      CaseUpdate { sc_no: Some("SC/2/2024".into()), ..Default::default() },
    )
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateFilingNumber(_)));

  let missing = s.update_case("CASE999".into(), CaseUpdate::default()).await.unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn deleting_a_case_cascades_to_parties_and_petitions() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  s.add_accused(new_accused("CASE001", "John Doe", "A1")).await.unwrap();
  s.file_petition(
    petition_for("CASE001", "1"),
    NewComplainant::placeholder("CASE001", None),
  )
  .await
  .unwrap();

  let deleted = s.delete_case("CASE001".into()).await.unwrap();
  assert_eq!(deleted.map(|c| c.case_id).as_deref(), Some("CASE001"));

  let everything = PartyQuery::default();
  assert!(s.list_accused(everything.clone()).await.unwrap().is_empty());
  assert!(s.list_complainants(everything).await.unwrap().is_empty());
  assert!(s.list_petitions(PetitionQuery::default()).await.unwrap().is_empty());
  assert!(s.delete_case("CASE001".into()).await.unwrap().is_none());
}

// ─── Parties ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn accused_require_an_existing_case() {
  let s = store().await;
  let err = s.add_accused(new_accused("CASE404", "John Doe", "A1")).await.unwrap_err();
  assert!(matches!(err, Error::CaseNotFound(id) if id == "CASE404"));
}

#[tokio::test]
async fn accused_lookup_by_id_and_number() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  let a1 = s.add_accused(new_accused("CASE001", "John Doe", "A1")).await.unwrap();
  let a2 = s.add_accused(new_accused("CASE001", "Richard Roe", "A2")).await.unwrap();
  assert_eq!(a1.accused_id, "CA001");
  assert_eq!(a2.accused_id, "CA002");

  let found = s.find_accused(&AccusedKey::Number("A2".into())).await.unwrap();
  assert_eq!(found, Some(a2.clone()));
  let found = s.find_accused(&AccusedKey::Id("CA001".into())).await.unwrap();
  assert_eq!(found, Some(a1));

  let for_case = s.list_accused(PartyQuery::for_case("CASE001")).await.unwrap();
  assert_eq!(for_case.len(), 2);
  assert_eq!(for_case[0], a2);
}

#[tokio::test]
async fn accused_update_keeps_unspecified_fields() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  s.add_accused(NewAccused {
    address: Some("12 Main Road".into()),
    ..new_accused("CASE001", "John Doe", "A1")
  })
  .await
  .unwrap();

  let updated = s
    .update_accused(
      "CA001".into(),
      AccusedUpdate { phone: Some("98400 00000".into()), ..Default::default() },
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.phone.as_deref(), Some("98400 00000"));
  assert_eq!(updated.address.as_deref(), Some("12 Main Road"));

  let err = s
    .update_accused("CA001".into(), AccusedUpdate { name: Some("".into()), ..Default::default() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(_)));
}

#[tokio::test]
async fn complainant_crud() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  let c = s
    .add_complainant(NewComplainant {
      case_id: "CASE001".into(),
      name: "Priya".into(),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(c.complainant_id, "CC001");
  assert_eq!(s.get_complainant("CC001".into()).await.unwrap(), Some(c));

  let deleted = s.delete_complainant("CC001".into()).await.unwrap();
  assert!(deleted.is_some());
  assert!(s.get_complainant("CC001".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn complainant_named_by_a_petition_cannot_be_deleted() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  let filing = s
    .file_petition(petition_for("CASE001", "1"), NewComplainant::placeholder("CASE001", None))
    .await
    .unwrap();

  let err = s.delete_complainant("CC001".into()).await.unwrap_err();
  assert!(matches!(
    err,
    Error::ComplainantInUse { ref complainant_id, petitions: 1 } if complainant_id == "CC001"
  ));
  assert!(s.get_complainant("CC001".into()).await.unwrap().is_some());
  assert_eq!(s.list_petitions(PetitionQuery::default()).await.unwrap(), [filing.petition.clone()]);

  s.delete_petition(filing.petition.petition_id).await.unwrap();
  assert!(s.delete_complainant("CC001".into()).await.unwrap().is_some());
}

// ─── Templates ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn production_templates_are_seeded() {
  let s = store().await;
  let templates = s.list_templates().await.unwrap();
  let codes: Vec<_> = templates.iter().map(|t| t.template_code.as_str()).collect();
  assert_eq!(codes, ["TEMP-001", "TEMP-002"]);

  let poa = s
    .find_template(&TemplateKey::Code("TEMP-002".into()))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(poa.template_name, "Vakalathnama");
  assert_eq!(poa.render_code(), RenderCode::POWER_OF_ATTORNEY);

  let petition = s.find_template(&TemplateKey::Id("1".into())).await.unwrap().unwrap();
  assert!(
    petition
      .questions
      .iter()
      .any(|q| q.question_id == "selected_accused_ids" && q.question_type == QuestionKind::MultiSelect)
  );
}

#[tokio::test]
async fn reopening_schema_does_not_duplicate_seeds() {
  let s = store().await;
  s.init_schema().await.unwrap();
  assert_eq!(s.list_templates().await.unwrap().len(), 2);
}

// ─── Petitions ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn first_filing_creates_placeholder_complainant_once() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();

  let first = s
    .file_petition(petition_for("CASE001", "1"), NewComplainant::placeholder("CASE001", Some("adv-1")))
    .await
    .unwrap();
  assert!(first.complainant_created);
  assert_eq!(first.complainant.name, NewComplainant::PLACEHOLDER_NAME);
  assert_eq!(first.complainant.created_by.as_deref(), Some("adv-1"));
  assert_eq!(first.petition.complainant_id, first.complainant.complainant_id);
  assert!(first.petition.petition_id.starts_with("CP_"));

  let second = s
    .file_petition(petition_for("CASE001", "2"), NewComplainant::placeholder("CASE001", None))
    .await
    .unwrap();
  assert!(!second.complainant_created);
  assert_eq!(second.complainant.complainant_id, first.complainant.complainant_id);

  let complainants = s.list_complainants(PartyQuery::for_case("CASE001")).await.unwrap();
  assert_eq!(complainants.len(), 1);
}

#[tokio::test]
async fn newest_complainant_is_used() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  for name in ["Older", "Newer"] {
    s.add_complainant(NewComplainant {
      case_id: "CASE001".into(),
      name: name.into(),
      ..Default::default()
    })
    .await
    .unwrap();
  }

  let filing = s
    .file_petition(petition_for("CASE001", "1"), NewComplainant::placeholder("CASE001", None))
    .await
    .unwrap();
  assert_eq!(filing.complainant.name, "Newer");
  assert!(!filing.complainant_created);
}

#[tokio::test]
async fn failed_petition_insert_leaves_no_orphan_complainant() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();

  // No such template: the petition insert violates its foreign key.
  let err = s
    .file_petition(petition_for("CASE001", "99"), NewComplainant::placeholder("CASE001", None))
    .await
    .unwrap_err();
  assert!(matches!(err, FilingError::Petition(_)));

  assert!(s.list_complainants(PartyQuery::for_case("CASE001")).await.unwrap().is_empty());
  assert!(s.list_petitions(PetitionQuery::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn filing_for_a_missing_case_fails_at_the_complainant() {
  let s = store().await;
  let err = s
    .file_petition(petition_for("CASE404", "1"), NewComplainant::placeholder("CASE404", None))
    .await
    .unwrap_err();
  assert!(matches!(err, FilingError::Complainant(_)));
}

#[tokio::test]
async fn lost_connection_during_filing_is_a_petition_failure() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  s.clone().close().await.unwrap();

  let err = s
    .file_petition(petition_for("CASE001", "1"), NewComplainant::placeholder("CASE001", None))
    .await
    .unwrap_err();
  assert!(matches!(err, FilingError::Petition(Error::Database(_))));
}

#[tokio::test]
async fn petition_listing_filters_and_document_path_updates() {
  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  s.create_case(new_case("SC/2/2024")).await.unwrap();
  let p1 = s
    .file_petition(petition_for("CASE001", "1"), NewComplainant::placeholder("CASE001", None))
    .await
    .unwrap()
    .petition;
  s.file_petition(petition_for("CASE002", "1"), NewComplainant::placeholder("CASE002", None))
    .await
    .unwrap();

  let for_case = s
    .list_petitions(PetitionQuery { case_id: Some("CASE001".into()), created_by: None })
    .await
    .unwrap();
  assert_eq!(for_case, [p1.clone()]);

  let updated = s
    .update_document_path(p1.petition_id.clone(), Some("uploads/petitions/x.pdf".into()))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.document_path.as_deref(), Some("uploads/petitions/x.pdf"));
  assert_eq!(s.get_petition(p1.petition_id.clone()).await.unwrap(), Some(updated));

  assert!(s.delete_petition(p1.petition_id.clone()).await.unwrap().is_some());
  assert!(s.get_petition(p1.petition_id).await.unwrap().is_none());
}

#[tokio::test]
async fn errors_are_classified_for_callers() {
  use lawdesk_core::store::{Classify as _, ErrorClass};

  let s = store().await;
  s.create_case(new_case("SC/1/2024")).await.unwrap();
  let dup = s.create_case(new_case("SC/1/2024")).await.unwrap_err();
  assert_eq!(dup.class(), ErrorClass::Conflict);

  let orphan = s.add_accused(new_accused("CASE404", "X", "A1")).await.unwrap_err();
  assert_eq!(orphan.class(), ErrorClass::MissingParent);

  let blank = s.add_accused(new_accused("CASE001", " ", "A1")).await.unwrap_err();
  assert_eq!(blank.class(), ErrorClass::Invalid);

  s.file_petition(petition_for("CASE001", "1"), NewComplainant::placeholder("CASE001", None))
    .await
    .unwrap();
  let in_use = s.delete_complainant("CC001".into()).await.unwrap_err();
  assert_eq!(in_use.class(), ErrorClass::Conflict);
}

// ─── Directory ───────────────────────────────────────────────────────────────

fn new_firm(name: &str) -> NewLawFirm {
  NewLawFirm { name: name.into(), created_by: Some("admin".into()), ..Default::default() }
}

fn new_advocate(name: &str, email: &str, firm_id: Option<&str>) -> NewAdvocate {
  NewAdvocate {
    name: name.into(),
    email: email.into(),
    phone: Some("9876543210".into()),
    firm_id: firm_id.map(Into::into),
    ..Default::default()
  }
}

#[tokio::test]
async fn law_firm_names_are_unique_ignoring_case() {
  let s = store().await;
  let firm = s.create_law_firm(new_firm("Iyer & Co")).await.unwrap();
  assert_eq!(firm.firm_id, "LF001");

  let err = s.create_law_firm(new_firm("IYER & CO")).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateFirmName(ref n) if n == "IYER & CO"));

  let blank = s.create_law_firm(new_firm(" ")).await.unwrap_err();
  assert!(matches!(blank, Error::Core(_)));

  assert_eq!(s.get_law_firm("LF001".into()).await.unwrap(), Some(firm));
  assert!(s.get_law_firm("LF404".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn law_firms_listed_by_name_and_searchable() {
  let s = store().await;
  s.create_law_firm(new_firm("Sundaram Associates")).await.unwrap();
  s.create_law_firm(new_firm("iyer & co")).await.unwrap();
  s.create_law_firm(new_firm("Menon Legal")).await.unwrap();

  let names = |firms: Vec<lawdesk_core::directory::LawFirm>| -> Vec<String> {
    firms.into_iter().map(|f| f.name).collect()
  };
  assert_eq!(
    names(s.list_law_firms(None).await.unwrap()),
    ["iyer & co", "Menon Legal", "Sundaram Associates"]
  );
  assert_eq!(names(s.list_law_firms(Some("LEGAL".into())).await.unwrap()), ["Menon Legal"]);
  assert_eq!(s.list_law_firms(Some("  ".into())).await.unwrap().len(), 3);
}

#[tokio::test]
async fn advocates_need_a_known_firm_and_unique_email() {
  let s = store().await;
  s.create_law_firm(new_firm("Iyer & Co")).await.unwrap();

  let a = s.add_advocate(new_advocate("R. Kumar", "kumar@iyer.in", Some("LF001"))).await.unwrap();
  assert_eq!(a.advocate_id, "ADV001");
  assert_eq!(a.status, AdvocateStatus::Pending);
  assert!(!a.email_verified);
  assert_eq!(s.get_advocate("ADV001".into()).await.unwrap(), Some(a));

  let orphan = s.add_advocate(new_advocate("X", "x@y.in", Some("LF404"))).await.unwrap_err();
  assert!(matches!(orphan, Error::FirmNotFound(ref id) if id == "LF404"));

  let dup = s.add_advocate(new_advocate("Other", "KUMAR@iyer.in", None)).await.unwrap_err();
  assert!(matches!(dup, Error::DuplicateAdvocateEmail(_)));

  let freelance = s.add_advocate(new_advocate("Lakshmi", "l@mail.in", None)).await.unwrap();
  assert_eq!(freelance.advocate_id, "ADV002");
  assert!(freelance.firm_id.is_none());
}

async fn advocate_names(s: &SqliteStore, search: &str) -> Vec<String> {
  let found = s.list_advocates(Some(search.into())).await.unwrap();
  found.into_iter().map(|a| a.name).collect()
}

#[tokio::test]
async fn advocate_search_matches_name_email_or_phone() {
  let s = store().await;
  s.add_advocate(new_advocate("R. Kumar", "kumar@iyer.in", None)).await.unwrap();
  s.add_advocate(NewAdvocate {
    phone: Some("044-2233".into()),
    ..new_advocate("Anita", "anita@menon.in", None)
  })
  .await
  .unwrap();

  assert_eq!(advocate_names(&s, "kumar").await, ["R. Kumar"]);
  assert_eq!(advocate_names(&s, "MENON.IN").await, ["Anita"]);
  assert_eq!(advocate_names(&s, "2233").await, ["Anita"]);
  assert_eq!(s.list_advocates(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn advocate_update_and_status_changes() {
  let s = store().await;
  s.create_law_firm(new_firm("Iyer & Co")).await.unwrap();
  s.add_advocate(new_advocate("R. Kumar", "kumar@iyer.in", None)).await.unwrap();
  s.add_advocate(new_advocate("Anita", "anita@menon.in", None)).await.unwrap();

  let updated = s
    .update_advocate(
      "ADV001".into(),
      AdvocateUpdate { firm_id: Some("LF001".into()), ..Default::default() },
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.firm_id.as_deref(), Some("LF001"));
  assert_eq!(updated.email, "kumar@iyer.in");

  let taken = s
    .update_advocate(
      "ADV001".into(),
      AdvocateUpdate { email: Some("Anita@Menon.in".into()), ..Default::default() },
    )
    .await
    .unwrap_err();
  assert!(matches!(taken, Error::DuplicateAdvocateEmail(_)));

  let active = s
    .set_advocate_status("ADV001".into(), AdvocateStatus::Active)
    .await
    .unwrap()
    .unwrap();
  assert!(active.status.is_active());
  let inactive = s
    .set_advocate_status("ADV001".into(), AdvocateStatus::Inactive)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(inactive.status, AdvocateStatus::Inactive);

  assert!(s.set_advocate_status("ADV404".into(), AdvocateStatus::Active).await.unwrap().is_none());
  assert!(s.update_advocate("ADV404".into(), AdvocateUpdate::default()).await.unwrap().is_none());
  assert!(s.delete_advocate("ADV002".into()).await.unwrap().is_some());
  assert!(s.get_advocate("ADV002".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn rosters_group_advocates_and_firm_delete_detaches_them() {
  let s = store().await;
  s.create_law_firm(new_firm("Iyer & Co")).await.unwrap();
  s.create_law_firm(new_firm("Menon Legal")).await.unwrap();
  s.add_advocate(new_advocate("Vikram", "v@iyer.in", Some("LF001"))).await.unwrap();
  s.add_advocate(new_advocate("Anita", "a@iyer.in", Some("LF001"))).await.unwrap();

  let rosters = s.firm_rosters(None).await.unwrap();
  assert_eq!(rosters.len(), 2);
  assert_eq!(rosters[0].firm.name, "Iyer & Co");
  assert_eq!(rosters[0].advocate_count, 2);
  let names: Vec<_> = rosters[0].advocates.iter().map(|a| a.name.as_str()).collect();
  assert_eq!(names, ["Anita", "Vikram"]);
  assert_eq!(rosters[1].advocate_count, 0);

  let filtered = s.firm_rosters(Some("menon".into())).await.unwrap();
  assert_eq!(filtered.len(), 1);
  assert_eq!(filtered[0].firm.firm_id, "LF002");

  assert!(s.delete_law_firm("LF001".into()).await.unwrap().is_some());
  let vikram = s.get_advocate("ADV001".into()).await.unwrap().unwrap();
  assert!(vikram.firm_id.is_none());
  assert!(s.delete_law_firm("LF001".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn directory_errors_are_classified() {
  use lawdesk_core::store::{Classify as _, ErrorClass};

  let s = store().await;
  s.create_law_firm(new_firm("Iyer & Co")).await.unwrap();
  let dup = s.create_law_firm(new_firm("iyer & co")).await.unwrap_err();
  assert_eq!(dup.class(), ErrorClass::Conflict);
  let orphan = s.add_advocate(new_advocate("X", "x@y.in", Some("LF009"))).await.unwrap_err();
  assert_eq!(orphan.class(), ErrorClass::MissingParent);
}
