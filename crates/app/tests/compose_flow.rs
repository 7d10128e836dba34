//! Composing an invoice against a live HTTP backend.

use std::sync::Arc;

use invoicer::products::ProductId;
use invoicer_app::{
    context::AppContext,
    notify::{Notification, RecordingNotifier},
    views::{ComposeView, compose::SubmitError},
};
use reqwest::Url;
use rust_decimal_macros::dec;
use serde_json::json;
use testresult::TestResult;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

async fn backend_with_catalog() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Pen", "price": 10 },
            { "id": 2, "name": "Notebook", "price": 50 },
        ])))
        .mount(&server)
        .await;

    server
}

fn compose(server: &MockServer) -> TestResult<(ComposeView, RecordingNotifier)> {
    let notifier = RecordingNotifier::default();
    let ctx = AppContext::from_api_url(&Url::parse(&server.uri())?, Arc::new(notifier.clone()))?;

    Ok((ComposeView::new(ctx), notifier))
}

fn add(view: &mut ComposeView, product: i64, quantity: i64) -> TestResult {
    view.select_product(Some(ProductId::new(product)));
    view.set_quantity(quantity);
    view.add_selected()?;

    Ok(())
}

#[tokio::test]
async fn merged_lines_are_submitted_once_per_product() -> TestResult {
    let server = backend_with_catalog().await;

    Mock::given(method("POST"))
        .and(path("/invoice"))
        .and(body_json(json!({
            "customerName": "Asha Rao",
            "customerEmail": "asha@example.com",
            "items": [
                { "product": { "id": 1 }, "quantity": 5 },
                { "product": { "id": 2 }, "quantity": 2 },
            ],
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (mut view, notifier) = compose(&server)?;

    view.load_catalog().await?;

    add(&mut view, 1, 2)?;
    add(&mut view, 2, 2)?;
    add(&mut view, 1, 3)?;

    assert_eq!(view.cart().len(), 2);
    assert_eq!(view.total()?, dec!(150));

    view.set_customer_name("Asha Rao");
    view.set_customer_email("asha@example.com");
    view.submit().await?;

    assert!(view.cart().is_empty());
    assert!(view.customer_name().is_empty());
    assert_eq!(
        notifier.last(),
        Some(Notification::success(
            "Invoice created and emailed successfully!"
        ))
    );

    Ok(())
}

#[tokio::test]
async fn removed_lines_are_not_submitted() -> TestResult {
    let server = backend_with_catalog().await;

    Mock::given(method("POST"))
        .and(path("/invoice"))
        .and(body_json(json!({
            "customerName": "Asha Rao",
            "customerEmail": "asha@example.com",
            "items": [{ "product": { "id": 2 }, "quantity": 1 }],
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (mut view, _notifier) = compose(&server)?;

    view.load_catalog().await?;

    add(&mut view, 1, 4)?;
    add(&mut view, 2, 1)?;
    view.remove(ProductId::new(1));

    view.set_customer_name("Asha Rao");
    view.set_customer_email("asha@example.com");
    view.submit().await?;

    Ok(())
}

#[tokio::test]
async fn backend_rejection_keeps_the_form() -> TestResult {
    let server = backend_with_catalog().await;

    Mock::given(method("POST"))
        .and(path("/invoice"))
        .respond_with(ResponseTemplate::new(500).set_body_string("SMTP unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let (mut view, notifier) = compose(&server)?;

    view.load_catalog().await?;

    add(&mut view, 2, 1)?;

    view.set_customer_name("Asha Rao");
    view.set_customer_email("asha@example.com");

    let result = view.submit().await;

    assert!(matches!(result, Err(SubmitError::Service(_))));
    assert_eq!(view.cart().len(), 1);
    assert_eq!(view.customer_email(), "asha@example.com");
    assert!(!view.is_submitting());
    assert_eq!(
        notifier.last(),
        Some(Notification::error(
            "Failed to create invoice: SMTP unavailable"
        ))
    );

    Ok(())
}

#[tokio::test]
async fn incomplete_form_never_reaches_the_backend() -> TestResult {
    let server = backend_with_catalog().await;

    Mock::given(method("POST"))
        .and(path("/invoice"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (mut view, notifier) = compose(&server)?;

    view.load_catalog().await?;
    view.set_customer_name("Asha Rao");

    let result = view.submit().await;

    assert!(matches!(result, Err(SubmitError::Validation(_))));
    assert!(notifier.last().is_some_and(|n| n.is_destructive()));

    Ok(())
}
