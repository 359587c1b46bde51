use academy::service::setting::SettingService;

use super::*;

/// Expect the default until the setting is stored
#[tokio::test]
async fn get_value_or_falls_back_to_default() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let service = SettingService::new(&test.db);

    let before = service.get_value_or("max_upload_mb", "25").await.unwrap();
    service
        .set("max_upload_mb", "50", Some("Upload size limit".to_string()), Some(true))
        .await
        .unwrap();
    let after = service.get_value_or("max_upload_mb", "25").await.unwrap();
    let public = service.list_public().await.unwrap();

    assert_eq!(before, "25");
    assert_eq!(after, "50");
    assert_eq!(public.len(), 1);

    Ok(())
}

/// Expect new settings to be private unless requested otherwise
#[tokio::test]
async fn new_settings_are_private() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let service = SettingService::new(&test.db);

    let setting = service
        .set("payment_gateway_key", String::from("sk_test"), None, None)
        .await
        .unwrap();

    assert!(!setting.is_public);
    assert!(service.list_public().await.unwrap().is_empty());

    Ok(())
}

/// Expect concurrent writes of a new key to leave exactly one row holding one of the values
#[tokio::test]
async fn concurrent_set_of_new_key() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let first = SettingService::new(&test.db);
    let second = SettingService::new(&test.db);

    for round in 0..20 {
        let key = format!("feature_flag_{round}");

        let (a, b) = tokio::join!(
            first.set(&key, "a", None, None),
            second.set(&key, "b", None, Some(true)),
        );
        let stored = first.get(&key).await.unwrap().unwrap();

        assert!(a.is_ok(), "{a:?}");
        assert!(b.is_ok(), "{b:?}");
        assert_eq!(a.unwrap().id, stored.id);
        assert!(stored.value == "a" || stored.value == "b");
    }

    Ok(())
}
