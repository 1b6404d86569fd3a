use bizdesk_core::db::{open_db_in_memory, Connection};
use bizdesk_core::model::client::Client;
use bizdesk_core::model::inventory::InventoryItem;
use bizdesk_core::model::transaction::{Transaction, TransactionType};
use bizdesk_core::{
    export_json, parse_import, Entity, EntityService, RepoError, SqliteRecordRepository,
    ValidationError,
};
use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

type Service<'conn, E> = EntityService<E, SqliteRecordRepository<'conn, E>>;

fn service<E: Entity>(conn: &Connection) -> Service<'_, E> {
    EntityService::new(SqliteRecordRepository::try_new(conn).unwrap())
}

fn income(amount: f64) -> Transaction {
    Transaction::new(
        TransactionType::Income,
        "repair",
        amount,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    )
}

#[test]
fn create_assigns_fresh_id_and_appends() {
    let conn = open_db_in_memory().unwrap();
    let clients = service::<Client>(&conn);

    let draft = Client::new("Anna", "+1 555 0100");
    let first = clients.create(draft.clone()).unwrap();
    let second = clients.create(draft.clone()).unwrap();

    assert_ne!(first.id, draft.id);
    assert_ne!(first.id, second.id);
    let ids: Vec<Uuid> = clients.get_all().unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(clients.get(first.id).unwrap(), Some(first));
}

#[test]
fn kinds_are_partitioned() {
    let conn = open_db_in_memory().unwrap();
    service::<Client>(&conn)
        .create(Client::new("Anna", "1"))
        .unwrap();

    assert!(service::<Transaction>(&conn).get_all().unwrap().is_empty());
}

#[test]
fn create_rejects_invalid_records_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let finance = service::<Transaction>(&conn);

    let err = finance.create(income(0.0)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::NonPositive { .. })
    ));

    let mut blank = income(10.0);
    blank.category = "  ".to_string();
    assert!(matches!(
        finance.create(blank).unwrap_err(),
        RepoError::Validation(ValidationError::MissingField { .. })
    ));
    assert!(finance.get_all().unwrap().is_empty());
}

#[test]
fn non_finite_numbers_are_rejected_and_snapshots_stay_readable() {
    let conn = open_db_in_memory().unwrap();
    let finance = service::<Transaction>(&conn);
    let items = service::<InventoryItem>(&conn);
    let clients = service::<Client>(&conn);

    assert!(matches!(
        finance.create(income(f64::INFINITY)).unwrap_err(),
        RepoError::Validation(ValidationError::NotFinite { field: "amount", .. })
    ));

    let mut priceless = InventoryItem::new("screen", "parts", 3, 2, f64::INFINITY);
    assert!(matches!(
        items.create(priceless.clone()).unwrap_err(),
        RepoError::Validation(ValidationError::NotFinite { field: "price", .. })
    ));
    priceless.price = 100.0;
    priceless.cost_price = Some(f64::NAN);
    assert!(matches!(
        items.create(priceless).unwrap_err(),
        RepoError::Validation(ValidationError::NotFinite { field: "costPrice", .. })
    ));

    let mut spender = Client::new("Anna", "1");
    spender.total_spent = f64::NAN;
    assert!(matches!(
        clients.create(spender).unwrap_err(),
        RepoError::Validation(ValidationError::NotFinite { field: "totalSpent", .. })
    ));

    let kept = finance.create(income(10.0)).unwrap();
    let mut overflow = kept.clone();
    overflow.amount = f64::INFINITY;
    assert!(matches!(
        finance.replace(overflow).unwrap_err(),
        RepoError::Validation(_)
    ));

    assert_eq!(finance.get_all().unwrap(), vec![kept]);
    assert!(items.get_all().unwrap().is_empty());
    assert!(clients.get_all().unwrap().is_empty());
}

#[test]
fn update_merges_patch_and_keeps_identity() {
    let conn = open_db_in_memory().unwrap();
    let items = service::<InventoryItem>(&conn);
    let item = items
        .create(InventoryItem::new("screen", "parts", 3, 2, 100.0))
        .unwrap();

    let updated = items
        .update(
            item.id,
            &json!({ "id": Uuid::new_v4(), "quantity": 12, "supplier": "Acme", "colour": "red" }),
        )
        .unwrap();

    assert_eq!(updated.id, item.id);
    assert_eq!(updated.quantity, 12);
    assert_eq!(updated.supplier.as_deref(), Some("Acme"));
    assert_eq!(updated.name, "screen");
    assert_eq!(items.get(item.id).unwrap(), Some(updated));
}

#[test]
fn update_validates_merged_record() {
    let conn = open_db_in_memory().unwrap();
    let items = service::<InventoryItem>(&conn);
    let item = items
        .create(InventoryItem::new("screen", "parts", 3, 2, 100.0))
        .unwrap();

    let err = items.update(item.id, &json!({ "name": "" })).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(items.get(item.id).unwrap().unwrap().name, "screen");
}

#[test]
fn update_and_delete_missing_id_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let clients = service::<Client>(&conn);
    let missing = Uuid::new_v4();

    assert!(matches!(
        clients.update(missing, &json!({ "name": "Bob" })).unwrap_err(),
        RepoError::NotFound { id, .. } if id == missing
    ));
    assert!(matches!(
        clients.delete(missing).unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn delete_removes_only_the_target() {
    let conn = open_db_in_memory().unwrap();
    let clients = service::<Client>(&conn);
    let anna = clients.create(Client::new("Anna", "1")).unwrap();
    let bob = clients.create(Client::new("Bob", "2")).unwrap();

    clients.delete(anna.id).unwrap();

    assert_eq!(clients.get(anna.id).unwrap(), None);
    assert_eq!(clients.get_all().unwrap(), vec![bob]);
}

#[test]
fn import_with_duplicate_id_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let finance = service::<Transaction>(&conn);
    let existing = finance.create(income(10.0)).unwrap();

    let mut clash = income(20.0);
    clash.id = existing.id;
    let err = finance.import(&[income(30.0), clash]).unwrap_err();

    assert!(matches!(err, RepoError::DuplicateId { .. }));
    assert_eq!(finance.get_all().unwrap(), vec![existing]);
}

#[test]
fn import_assigns_ids_to_records_without_one() {
    let conn = open_db_in_memory().unwrap();
    let clients = service::<Client>(&conn);

    let records: Vec<Client> = parse_import(
        r#"[
            {"name": "Anna", "phone": "1"},
            {"id": "8f0c2f4e-3d5b-4b8a-9a55-0f1c2d3e4f50", "name": "Bob", "phone": "2"}
        ]"#,
    )
    .unwrap();
    assert_eq!(clients.import(&records).unwrap(), 2);

    let bob_id = Uuid::parse_str("8f0c2f4e-3d5b-4b8a-9a55-0f1c2d3e4f50").unwrap();
    assert_eq!(clients.get(bob_id).unwrap().unwrap().name, "Bob");
    assert_eq!(clients.get_all().unwrap().len(), 2);
}

#[test]
fn export_then_import_round_trips_as_a_set() {
    let source = open_db_in_memory().unwrap();
    let finance = service::<Transaction>(&source);
    let mut tagged = income(250.0);
    tagged.tags = vec!["warranty".to_string()];
    tagged.payment_method = Some("card".to_string());
    finance.create(tagged).unwrap();
    finance.create(income(99.5)).unwrap();

    let json = export_json(&finance.export().unwrap()).unwrap();

    let target = open_db_in_memory().unwrap();
    let restored = service::<Transaction>(&target);
    restored
        .import(&parse_import::<Transaction>(&json).unwrap())
        .unwrap();

    let mut expected = finance.export().unwrap();
    let mut actual = restored.export().unwrap();
    expected.sort_by_key(|transaction| transaction.id);
    actual.sort_by_key(|transaction| transaction.id);
    assert_eq!(actual, expected);
}

#[test]
fn exported_records_use_camel_case_wire_names() {
    let conn = open_db_in_memory().unwrap();
    let finance = service::<Transaction>(&conn);
    let mut transaction = income(10.0);
    transaction.related_repair_id = Some("r-1".to_string());
    finance.create(transaction).unwrap();

    let json = export_json(&finance.export().unwrap()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["type"], "income");
    assert_eq!(value[0]["relatedRepairId"], "r-1");
    assert_eq!(value[0]["date"], "2024-03-01");
}
