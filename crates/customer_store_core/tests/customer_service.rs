use customer_store_core::{
    AcceptAll, Customer, CustomerService, ErrorKind, FileCustomerRepository, PageRequest,
    ServiceError, UuidIdValidator, MAX_PAGE_SIZE,
};
use std::path::Path;

fn service_in(dir: &Path) -> CustomerService<FileCustomerRepository> {
    let repo = FileCustomerRepository::open(dir.join("customers.json")).unwrap();
    CustomerService::new(repo)
}

#[test]
fn add_customer_generates_id_when_blank() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    let created = service
        .add_customer(&Customer::new("John Doe", "john@example.com"))
        .unwrap();

    assert!(created.has_id());
    assert_eq!(service.get_customer(&created.id).unwrap(), created);
}

#[test]
fn add_customer_rejects_invalid_fields_before_storage() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    let err = service
        .add_customer(&Customer::new("", "not-an-email"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BadRequest);
    let fields: Vec<_> = err
        .field_errors()
        .iter()
        .map(|error| error.field.as_str())
        .collect();
    assert_eq!(fields, vec!["name", "email"]);
    assert!(service.get_all_customers().unwrap().is_empty());
}

#[test]
fn get_customer_missing_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    let err = service.get_customer("missing").unwrap_err();
    assert!(matches!(&err, ServiceError::NotFound(id) if id == "missing"));
    assert_eq!(err.kind().status_code(), 404);
}

#[test]
fn update_customer_uses_path_id_over_body_id() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());
    let created = service
        .add_customer(&Customer::new("John Doe", "john@example.com"))
        .unwrap();
    let other = service
        .add_customer(&Customer::new("Other", "other@example.com"))
        .unwrap();

    let body = Customer::with_id(other.id.clone(), "John Updated", "john.updated@example.com");
    let updated = service.update_customer(&created.id, &body).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(service.get_customer(&created.id).unwrap().name, "John Updated");
    assert_eq!(service.get_customer(&other.id).unwrap().name, "Other");
    assert_eq!(service.get_all_customers().unwrap().len(), 2);
}

#[test]
fn update_customer_missing_is_not_found_and_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    let err = service
        .update_customer("missing", &Customer::new("Ghost", "ghost@example.com"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(service.get_all_customers().unwrap().is_empty());
}

#[test]
fn delete_customer_twice_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());
    let created = service
        .add_customer(&Customer::new("John Doe", "john@example.com"))
        .unwrap();

    service.delete_customer(&created.id).unwrap();
    let err = service.delete_customer(&created.id).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn list_customers_paged_reports_totals() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());
    for index in 0..25 {
        service
            .add_customer(&Customer::new(format!("Customer {index}"), "c@example.com"))
            .unwrap();
    }

    let page = service
        .list_customers_paged(PageRequest::new(2, 10))
        .unwrap();
    assert_eq!(page.content.len(), 5);
    assert_eq!(page.content[0].name, "Customer 20");
    assert_eq!(page.total_elements, 25);
    assert_eq!(page.total_pages, 3);

    let defaults = service.list_customers_paged(PageRequest::default()).unwrap();
    assert_eq!(defaults.size, 20);
    assert_eq!(defaults.content.len(), 20);

    assert_eq!(service.list_customers(3, 10).unwrap(), Vec::<Customer>::new());
}

#[test]
fn list_customers_paged_rejects_out_of_range_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    for size in [0, MAX_PAGE_SIZE + 1] {
        let err = service
            .list_customers_paged(PageRequest::new(0, size))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.field_errors()[0].field, "size");
    }

    let err = service.list_customers(0, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[test]
fn add_customer_keeps_caller_supplied_id() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    let created = service
        .add_customer(&Customer::with_id("custom-id", "New Customer", "new@example.com"))
        .unwrap();

    assert_eq!(created.id, "custom-id");
    assert_eq!(service.get_customer("custom-id").unwrap(), created);
}

#[test]
fn update_customer_ignores_non_uuid_body_id() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());
    let created = service
        .add_customer(&Customer::new("John Doe", "john@example.com"))
        .unwrap();

    let body = Customer::with_id("1", "John Updated", "john@example.com");
    let updated = service.update_customer(&created.id, &body).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "John Updated");
    assert!(matches!(
        service.get_customer("1"),
        Err(ServiceError::NotFound(_))
    ));
    assert_eq!(service.get_all_customers().unwrap().len(), 1);
}

#[test]
fn add_customer_rejects_padded_email_without_storing() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    let err = service
        .add_customer(&Customer::new("John Doe", "  john@example.com  "))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert_eq!(err.field_errors()[0].field, "email");
    assert!(service.get_all_customers().unwrap().is_empty());
}

#[test]
fn uuid_id_validator_is_opt_in() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileCustomerRepository::open(dir.path().join("customers.json")).unwrap();
    let strict = CustomerService::with_validator(repo, UuidIdValidator);

    let err = strict
        .add_customer(&Customer::with_id("legacy-8", "Legacy", "legacy@example.com"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert_eq!(err.field_errors()[0].field, "id");

    let created = strict
        .add_customer(&Customer::new("Fresh", "fresh@example.com"))
        .unwrap();
    let updated = strict
        .update_customer(
            &created.id,
            &Customer::with_id("1", "Fresh Updated", "fresh@example.com"),
        )
        .unwrap();
    assert_eq!(updated.id, created.id);

    let accept_dir = tempfile::tempdir().unwrap();
    let repo = FileCustomerRepository::open(accept_dir.path().join("customers.json")).unwrap();
    let lenient = CustomerService::with_validator(repo, AcceptAll);
    let stored = lenient
        .add_customer(&Customer::with_id("legacy-7", "", ""))
        .unwrap();
    assert_eq!(stored.id, "legacy-7");
}

#[test]
fn persistence_errors_map_to_internal() {
    let err = ServiceError::Repo(customer_store_core::RepoError::InvalidData(
        "broken".to_string(),
    ));
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.kind().status_code(), 500);
    assert!(err.field_errors().is_empty());
}
