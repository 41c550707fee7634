use secretree_store::{
    CreateSecretRequest, GetSecretRequest, MemoryStore, SecretPayload, SecretStore, StoreError,
    StoreOperation,
};

fn create(name: &str, value: &str) -> CreateSecretRequest {
    CreateSecretRequest {
        name: name.to_string(),
        payload: SecretPayload::String(value.to_string()),
        description: None,
        client_request_token: None,
        kms_key_id: None,
        tags: vec![],
    }
}

#[tokio::test]
async fn list_pages_follow_next_token() {
    let store = MemoryStore::new().with_page_size(2);
    for i in 0..5 {
        store.insert(format!("s{i}"), "v");
    }

    let mut names = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0;
    loop {
        let page = store.list_secrets_page(token.as_deref()).await.unwrap();
        pages += 1;
        names.extend(page.secrets.into_iter().map(|s| s.name));
        token = page.next_token;
        if token.is_none() {
            break;
        }
    }
    assert_eq!(pages, 3);
    assert_eq!(names, vec!["s0", "s1", "s2", "s3", "s4"]);
}

#[tokio::test]
async fn get_by_name_or_arn() {
    let store = MemoryStore::new();
    let created = store.create_secret(create("ns/dev/db", "secret")).await.unwrap();

    let by_name = store.get_secret_value(&GetSecretRequest::new("ns/dev/db")).await.unwrap();
    let by_arn = store.get_secret_value(&GetSecretRequest::new(created.arn.clone())).await.unwrap();
    assert_eq!(by_name, by_arn);
    assert_eq!(by_name.secret_string.as_deref(), Some("secret"));
    assert_eq!(Some(by_name.version_id), created.version_id);
}

#[tokio::test]
async fn version_and_stage_selectors() {
    let store = MemoryStore::new();
    store.insert("a", "1");
    let current = store.get_secret_value(&GetSecretRequest::new("a")).await.unwrap();

    let mut req = GetSecretRequest::new("a");
    req.version_id = Some(current.version_id.clone());
    assert!(store.get_secret_value(&req).await.is_ok());

    req.version_id = Some("nope".into());
    assert!(matches!(store.get_secret_value(&req).await, Err(StoreError::NotFound(_))));

    let mut staged = GetSecretRequest::new("a");
    staged.version_stage = Some("AWSPREVIOUS".into());
    assert!(matches!(store.get_secret_value(&staged).await, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn create_rejects_duplicates() {
    let store = MemoryStore::new();
    store.create_secret(create("x", "1")).await.unwrap();
    let err = store.create_secret(create("x", "2")).await.unwrap_err();
    assert_eq!(err.code(), "ResourceExistsException");
}

#[tokio::test]
async fn soft_delete_hides_secret_and_force_removes_it() {
    let store = MemoryStore::new();
    store.insert("keep", "1");
    store.insert("soft", "2");
    store.insert("hard", "3");

    let soft = store.delete_secret("soft", false).await.unwrap();
    assert!(soft.deletion_date.is_some());
    assert!(store.is_scheduled_for_deletion("soft"));

    store.delete_secret("hard", true).await.unwrap();
    assert!(!store.is_scheduled_for_deletion("hard"));

    assert_eq!(store.names(), vec!["keep"]);
    let err = store.get_secret_value(&GetSecretRequest::new("soft")).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    let err = store.delete_secret("hard", true).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn injected_failures_are_consumed_in_order() {
    let store = MemoryStore::new();
    store.insert("a", "1");
    store.fail_next(StoreOperation::Get, StoreError::RateLimited("slow down".into()), 2);

    for _ in 0..2 {
        let err = store.get_secret_value(&GetSecretRequest::new("a")).await.unwrap_err();
        assert!(err.is_rate_limited());
    }
    assert!(store.get_secret_value(&GetSecretRequest::new("a")).await.is_ok());
    assert_eq!(store.calls(StoreOperation::Get), 3);
    assert_eq!(store.calls(StoreOperation::List), 0);
}
