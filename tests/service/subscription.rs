use academy::{
    data::{payment::PaymentRepository, subscription::SubscriptionRepository},
    error::{billing::BillingError, Error},
    query::Delegates,
    service::{action, activity::ActivityService, subscription::SubscriptionService},
};
use academy_test_utils::fixtures::billing::mock_plan_price;
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{PaymentStatus, SubscriptionStatus};
use sea_orm::ActiveValue;

use super::*;

mod subscribe {
    use super::*;

    /// Expect an INACTIVE subscription and a PENDING payment at the plan's price
    #[tokio::test]
    async fn creates_pending_payment() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;
        let plan = test.billing().insert_mock_plan(1, 10, 10 * MIB).await?;

        let (subscription, payment) = SubscriptionService::new(&test.db)
            .subscribe(academy.id, plan.id, "card", true)
            .await
            .unwrap();

        assert_eq!(subscription.status, SubscriptionStatus::Inactive);
        assert!(subscription.auto_renew);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.subscription_id, subscription.id);
        assert_eq!(payment.amount.round_dp(2), mock_plan_price());
        assert_eq!(payment.currency, "USD");

        Ok(())
    }

    /// Expect retired plans to refuse new subscriptions
    #[tokio::test]
    async fn rejects_inactive_plan() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;
        let plan = test.billing().insert_mock_plan(1, 10, 10 * MIB).await?;
        test.db
            .subscription_plan()
            .update(
                plan.id,
                entity::subscription_plan::ActiveModel {
                    is_active: ActiveValue::Set(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let result = SubscriptionService::new(&test.db)
            .subscribe(academy.id, plan.id, "card", false)
            .await;

        assert!(matches!(
            result,
            Err(Error::BillingError(BillingError::PlanInactive(id))) if id == plan.id
        ));

        Ok(())
    }

    /// Expect NotFound for an unknown plan
    #[tokio::test]
    async fn rejects_unknown_plan() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;

        let result = SubscriptionService::new(&test.db)
            .subscribe(academy.id, 77, "card", false)
            .await;

        assert!(result.is_err_and(|err| err.is_not_found()));

        Ok(())
    }
}

mod complete_payment {
    use super::*;

    /// Expect the subscription to become current and replace the previous one
    #[tokio::test]
    async fn activates_and_replaces_previous() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;
        let old_plan = test.billing().insert_mock_plan(1, 5, 10 * MIB).await?;
        let new_plan = test.billing().insert_mock_plan(2, 50, 100 * MIB).await?;
        let previous = test
            .billing()
            .insert_active_subscription(academy.id, old_plan.id)
            .await?;
        let service = SubscriptionService::new(&test.db);
        let (requested, payment) = service
            .subscribe(academy.id, new_plan.id, "card", false)
            .await
            .unwrap();

        let before = Utc::now().naive_utc();
        let activated = service
            .complete_payment(payment.id, Some("txn_001".to_string()))
            .await
            .unwrap();
        let subscriptions = SubscriptionRepository::new(&test.db);
        let previous = subscriptions.find_by_id(previous.id).await.unwrap().unwrap();
        let (current, plan) = subscriptions
            .find_active_with_plan(academy.id, Utc::now().naive_utc())
            .await
            .unwrap()
            .unwrap();
        let payment = PaymentRepository::new(&test.db)
            .find_by_id(payment.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(activated.id, requested.id);
        assert_eq!(activated.status, SubscriptionStatus::Active);
        assert!(activated.start_date >= before);
        assert_eq!(activated.end_date, activated.start_date + Duration::days(30));
        assert_eq!(previous.status, SubscriptionStatus::Cancelled);
        assert_eq!(current.id, activated.id);
        assert_eq!(plan.id, new_plan.id);
        assert_eq!(payment.status, PaymentStatus::Completed);
        assert_eq!(payment.transaction_id.as_deref(), Some("txn_001"));
        assert!(payment.payment_date.is_some());

        Ok(())
    }

    /// Expect paying for a running subscription to extend it from its end date
    #[tokio::test]
    async fn renewal_extends_from_end_date() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;
        let plan = test.billing().insert_mock_plan(1, 10, 10 * MIB).await?;
        let running = test
            .billing()
            .insert_active_subscription(academy.id, plan.id)
            .await?;
        let payment = test
            .billing()
            .insert_mock_payment(
                academy.id,
                running.id,
                mock_plan_price(),
                PaymentStatus::Pending,
            )
            .await?;

        let renewed = SubscriptionService::new(&test.db)
            .complete_payment(payment.id, None)
            .await
            .unwrap();

        assert_eq!(renewed.id, running.id);
        assert_eq!(renewed.start_date, running.start_date);
        assert_eq!(renewed.end_date, running.end_date + Duration::days(30));

        Ok(())
    }

    /// Expect a payment to complete only once
    #[tokio::test]
    async fn rejects_second_completion() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;
        let plan = test.billing().insert_mock_plan(1, 10, 10 * MIB).await?;
        let service = SubscriptionService::new(&test.db);
        let (_, payment) = service
            .subscribe(academy.id, plan.id, "card", false)
            .await
            .unwrap();

        service.complete_payment(payment.id, None).await.unwrap();
        let result = service.complete_payment(payment.id, None).await;

        assert!(matches!(
            result,
            Err(Error::BillingError(BillingError::InvalidPaymentTransition {
                from: PaymentStatus::Completed,
                to: PaymentStatus::Completed,
            }))
        ));

        Ok(())
    }
}

mod payment_lifecycle {
    use super::*;

    /// Expect a refund to leave the paid subscription running
    #[tokio::test]
    async fn refund_keeps_subscription() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;
        let plan = test.billing().insert_mock_plan(1, 10, 10 * MIB).await?;
        let service = SubscriptionService::new(&test.db);
        let (_, payment) = service
            .subscribe(academy.id, plan.id, "card", false)
            .await
            .unwrap();
        let activated = service.complete_payment(payment.id, None).await.unwrap();

        let refunded = service.refund_payment(payment.id).await.unwrap();
        let subscription = SubscriptionRepository::new(&test.db)
            .find_by_id(activated.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(refunded.status, PaymentStatus::Refunded);
        assert_eq!(subscription.status, SubscriptionStatus::Active);

        Ok(())
    }

    /// Expect a failed payment to be final
    #[tokio::test]
    async fn failed_payment_is_final() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;
        let plan = test.billing().insert_mock_plan(1, 10, 10 * MIB).await?;
        let service = SubscriptionService::new(&test.db);
        let (subscription, payment) = service
            .subscribe(academy.id, plan.id, "card", false)
            .await
            .unwrap();

        let failed = service.fail_payment(payment.id).await.unwrap();
        let refund = service.refund_payment(payment.id).await;
        let cancel = service.cancel_payment(payment.id).await;
        let subscription = SubscriptionRepository::new(&test.db)
            .find_by_id(subscription.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(failed.status, PaymentStatus::Failed);
        assert!(matches!(
            refund,
            Err(Error::BillingError(BillingError::InvalidPaymentTransition { .. }))
        ));
        assert!(matches!(
            cancel,
            Err(Error::BillingError(BillingError::InvalidPaymentTransition { .. }))
        ));
        assert_eq!(subscription.status, SubscriptionStatus::Inactive);

        Ok(())
    }

    /// Expect payment totals per status
    #[tokio::test]
    async fn revenue_by_status() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;
        let plan = test.billing().insert_mock_plan(1, 10, 10 * MIB).await?;
        let service = SubscriptionService::new(&test.db);
        let (_, paid) = service
            .subscribe(academy.id, plan.id, "card", false)
            .await
            .unwrap();
        let (_, abandoned) = service
            .subscribe(academy.id, plan.id, "card", false)
            .await
            .unwrap();
        service.complete_payment(paid.id, None).await.unwrap();
        service.cancel_payment(abandoned.id).await.unwrap();

        let rows = service.revenue_by_status(None).await.unwrap();

        let statuses: Vec<&serde_json::Value> = rows
            .iter()
            .filter_map(|row| row.key.get("status"))
            .collect();
        assert_eq!(
            statuses,
            vec![
                &serde_json::json!("CANCELLED"),
                &serde_json::json!("COMPLETED")
            ]
        );
        assert!(rows.iter().all(|row| row.aggregates.count_all == Some(1)));

        Ok(())
    }
}

/// Expect cancellation to be limited to the academy's own subscriptions
#[tokio::test]
async fn cancel_checks_ownership() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let (academy, plan) = subscribed_academy(&test, 1, 10, 10 * MIB).await?;
    let other = test.academy().insert_mock_academy(2).await?;
    let subscription = test
        .billing()
        .insert_active_subscription(academy.id, plan.id)
        .await?;
    let service = SubscriptionService::new(&test.db);

    let foreign = service.cancel(other.id, subscription.id).await;
    let cancelled = service.cancel(academy.id, subscription.id).await.unwrap();

    assert!(foreign.is_err_and(|err| err.is_not_found()));
    assert_eq!(cancelled.status, SubscriptionStatus::Cancelled);

    Ok(())
}

/// Expect cancelling a requested subscription to close its payment so it can't reactivate
#[tokio::test]
async fn cancel_closes_pending_payment() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let (academy, plan) = subscribed_academy(&test, 1, 10, 10 * MIB).await?;
    let service = SubscriptionService::new(&test.db);
    let (requested, payment) = service
        .subscribe(academy.id, plan.id, "card", false)
        .await
        .unwrap();

    let cancelled = service.cancel(academy.id, requested.id).await.unwrap();
    let completion = service.complete_payment(payment.id, None).await;
    let payment = PaymentRepository::new(&test.db)
        .find_by_id(payment.id)
        .await
        .unwrap()
        .unwrap();
    let (current, _) = SubscriptionRepository::new(&test.db)
        .find_active_with_plan(academy.id, Utc::now().naive_utc())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(cancelled.status, SubscriptionStatus::Cancelled);
    assert_eq!(payment.status, PaymentStatus::Cancelled);
    assert!(matches!(
        completion,
        Err(Error::BillingError(BillingError::InvalidPaymentTransition { .. }))
    ));
    assert_ne!(current.id, requested.id);

    Ok(())
}

/// Expect a payment for a closed subscription to stay pending instead of reviving it
#[tokio::test]
async fn complete_payment_rejects_closed_subscription() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let (academy, plan) = subscribed_academy(&test, 1, 10, 10 * MIB).await?;
    let service = SubscriptionService::new(&test.db);
    let (requested, payment) = service
        .subscribe(academy.id, plan.id, "card", false)
        .await
        .unwrap();
    SubscriptionRepository::new(&test.db)
        .set_status(requested.id, SubscriptionStatus::Expired)
        .await
        .unwrap();

    let result = service.complete_payment(payment.id, None).await;
    let payment = PaymentRepository::new(&test.db)
        .find_by_id(payment.id)
        .await
        .unwrap()
        .unwrap();
    let requested = SubscriptionRepository::new(&test.db)
        .find_by_id(requested.id)
        .await
        .unwrap()
        .unwrap();

    assert!(matches!(
        result,
        Err(Error::BillingError(BillingError::SubscriptionClosed {
            status: SubscriptionStatus::Expired,
            ..
        }))
    ));
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(requested.status, SubscriptionStatus::Expired);

    Ok(())
}

/// Expect expired and already cancelled subscriptions to refuse cancellation
#[tokio::test]
async fn cancel_rejects_closed_subscription() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let academy = test.academy().insert_mock_academy(1).await?;
    let plan = test.billing().insert_mock_plan(1, 10, 10 * MIB).await?;
    let now = Utc::now().naive_utc();
    let expired = test
        .billing()
        .insert_mock_subscription(
            academy.id,
            plan.id,
            SubscriptionStatus::Expired,
            now - Duration::days(60),
            now - Duration::days(30),
        )
        .await?;
    let service = SubscriptionService::new(&test.db);

    let result = service.cancel(academy.id, expired.id).await;

    assert!(matches!(
        result,
        Err(Error::BillingError(BillingError::SubscriptionClosed {
            status: SubscriptionStatus::Expired,
            ..
        }))
    ));

    Ok(())
}

/// Expect ended subscriptions to expire with one audit entry each
#[tokio::test]
async fn expire_due_records_activity() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let academy = test.academy().insert_mock_academy(1).await?;
    let plan = test.billing().insert_mock_plan(1, 10, 10 * MIB).await?;
    let now = Utc::now().naive_utc();
    for days_ago in [1, 2] {
        test.billing()
            .insert_mock_subscription(
                academy.id,
                plan.id,
                SubscriptionStatus::Active,
                now - Duration::days(30 + days_ago),
                now - Duration::days(days_ago),
            )
            .await?;
    }
    test.billing()
        .insert_active_subscription(academy.id, plan.id)
        .await?;
    let service = SubscriptionService::new(&test.db);

    let expired = service.expire_due(now).await.unwrap();
    let second_sweep = service.expire_due(now).await.unwrap();
    let activity = ActivityService::new(&test.db)
        .recent_for_academy(academy.id, 10)
        .await
        .unwrap();

    assert_eq!(expired, 2);
    assert_eq!(second_sweep, 0);
    assert_eq!(
        activity
            .iter()
            .filter(|entry| entry.action == action::SUBSCRIPTION_EXPIRED)
            .count(),
        2
    );

    Ok(())
}
