use customer_store_core::{paginate, Customer, PageError};

fn customers(count: usize) -> Vec<Customer> {
    (0..count)
        .map(|index| {
            Customer::with_id(
                format!("id-{index}"),
                format!("Customer {index}"),
                "c@example.com",
            )
        })
        .collect()
}

#[test]
fn twenty_five_items_in_pages_of_ten() {
    let snapshot = customers(25);

    let first = paginate(&snapshot, 0, 10).unwrap();
    assert_eq!(first.content.len(), 10);
    assert_eq!(first.content[0].id, "id-0");
    assert_eq!(first.total_elements, 25);
    assert_eq!(first.total_pages, 3);

    let last = paginate(&snapshot, 2, 10).unwrap();
    assert_eq!(last.content.len(), 5);
    assert_eq!(last.content[0].id, "id-20");
    assert_eq!(last.content[4].id, "id-24");

    let beyond = paginate(&snapshot, 3, 10).unwrap();
    assert!(beyond.content.is_empty());
    assert_eq!(beyond.page, 3);
    assert_eq!(beyond.size, 10);
    assert_eq!(beyond.total_elements, 25);
    assert_eq!(beyond.total_pages, 3);
}

#[test]
fn empty_snapshot_has_zero_pages() {
    let result = paginate::<Customer>(&[], 0, 20).unwrap();

    assert!(result.content.is_empty());
    assert_eq!(result.total_elements, 0);
    assert_eq!(result.total_pages, 0);
}

#[test]
fn zero_page_size_is_rejected_without_touching_input() {
    let snapshot = customers(3);
    let before = snapshot.clone();

    let err = paginate(&snapshot, 0, 0).unwrap_err();
    assert_eq!(err, PageError::InvalidSize { size: 0 });
    assert_eq!(snapshot, before);
}

#[test]
fn page_result_serializes_with_camel_case_keys() {
    let result = paginate(&customers(3), 1, 2).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["page"], 1);
    assert_eq!(json["size"], 2);
    assert_eq!(json["totalElements"], 3);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["content"][0]["id"], "id-2");
}
