use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::timeout;

use pinconfirm::backup::{BackupResponse, PinBackupService, PinSetResult, ResultHandler};
use pinconfirm::confirm::{ConfirmOutcome, ConfirmScreenFactory, Label, SaveAnimation};
use pinconfirm::{KeyboardMode, PinConfirmError, PinConfirmationController, PinValue};
use tokio_stream::StreamExt;

const TIMEOUT_MS: u64 = 200;

/// Backup adapter that hands every call to the test instead of answering it.
struct ForwardingBackup {
    calls: mpsc::UnboundedSender<(PinValue, KeyboardMode, ResultHandler)>,
}

#[async_trait]
impl PinBackupService for ForwardingBackup {
    async fn set_pin(&self, pin: PinValue, keyboard_mode: KeyboardMode, on_result: ResultHandler) {
        let _ = self.calls.send((pin, keyboard_mode, on_result));
    }
}

fn open_screen(
    pin: &str,
    keyboard_mode: KeyboardMode,
) -> (
    PinConfirmationController,
    mpsc::UnboundedReceiver<(PinValue, KeyboardMode, ResultHandler)>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let factory = ConfirmScreenFactory::new(
        PinValue::parse(pin),
        keyboard_mode,
        Arc::new(ForwardingBackup { calls: tx }),
    );
    (factory.create(), rx)
}

async fn next_call(
    rx: &mut mpsc::UnboundedReceiver<(PinValue, KeyboardMode, ResultHandler)>,
) -> (PinValue, KeyboardMode, ResultHandler) {
    timeout(Duration::from_millis(TIMEOUT_MS), rx.recv())
        .await
        .expect("backup call timed out")
        .expect("backup channel closed unexpectedly")
}

async fn next_response(controller: &mut PinConfirmationController) -> BackupResponse {
    timeout(Duration::from_millis(TIMEOUT_MS), controller.next_response())
        .await
        .expect("backup response timed out")
        .expect("response channel closed unexpectedly")
}

#[tokio::test]
async fn matching_entry_issues_exactly_one_backup_call() {
    let (mut controller, mut calls) = open_screen("1234", KeyboardMode::Numeric);

    controller.set_user_entry("1234");
    let outcome = controller.confirm().unwrap();

    assert!(matches!(outcome, ConfirmOutcome::Matched { .. }));
    assert_eq!(controller.label(), Label::CreatingPin);
    assert_eq!(controller.save_animation(), SaveAnimation::Loading);
    assert_eq!(controller.user_entry(), PinValue::EMPTY);

    let (pin, mode, _handler) = next_call(&mut calls).await;
    assert_eq!(pin, PinValue::parse("1234"));
    assert_eq!(mode, KeyboardMode::Numeric);

    assert!(
        timeout(Duration::from_millis(50), calls.recv()).await.is_err(),
        "expected a single backup call"
    );
}

#[tokio::test]
async fn mismatched_entry_never_reaches_backup() {
    let (mut controller, mut calls) = open_screen("1234", KeyboardMode::Numeric);

    controller.set_user_entry("4321");
    assert_eq!(controller.confirm().unwrap(), ConfirmOutcome::Mismatch);

    assert_eq!(controller.label(), Label::PinDoesNotMatch);
    assert_eq!(controller.save_animation(), SaveAnimation::None);
    assert_eq!(controller.user_entry().as_str(), "");
    assert!(timeout(Duration::from_millis(50), calls.recv()).await.is_err());
}

#[tokio::test]
async fn success_then_animation_complete_clears_label_only() {
    let (mut controller, mut calls) = open_screen("1234", KeyboardMode::Numeric);
    controller.set_user_entry("1234");
    controller.confirm().unwrap();

    let (_, _, handler) = next_call(&mut calls).await;
    handler.complete(PinSetResult::Success);
    let response = next_response(&mut controller).await;
    controller.handle_response(response).unwrap();
    assert_eq!(controller.save_animation(), SaveAnimation::Success);

    controller.on_loading_animation_complete();
    assert_eq!(controller.label(), Label::Empty);
    assert_eq!(controller.save_animation(), SaveAnimation::Success);
}

#[tokio::test]
async fn failure_can_be_retried() {
    let (mut controller, mut calls) = open_screen("1234", KeyboardMode::AlphaNumeric);
    controller.set_user_entry("1234");
    controller.confirm().unwrap();

    let (_, mode, handler) = next_call(&mut calls).await;
    assert_eq!(mode, KeyboardMode::AlphaNumeric);
    handler.complete(PinSetResult::Failure);
    let response = next_response(&mut controller).await;
    controller.handle_response(response).unwrap();
    assert_eq!(controller.save_animation(), SaveAnimation::Failure);

    controller.on_loading_animation_complete();
    controller.set_user_entry("1234");
    controller.confirm().unwrap();
    assert_eq!(controller.save_animation(), SaveAnimation::Loading);

    let (_, _, handler) = next_call(&mut calls).await;
    handler.complete(PinSetResult::Success);
    let response = next_response(&mut controller).await;
    controller.handle_response(response).unwrap();
    assert_eq!(controller.save_animation(), SaveAnimation::Success);
}

#[tokio::test]
async fn unexpected_outcome_is_reported_as_contract_violation() {
    let (mut controller, mut calls) = open_screen("1234", KeyboardMode::Numeric);
    controller.set_user_entry("1234");
    controller.confirm().unwrap();

    let (_, _, handler) = next_call(&mut calls).await;
    handler.complete_raw(2);
    let response = next_response(&mut controller).await;

    match controller.handle_response(response) {
        Err(PinConfirmError::ContractViolation { code, .. }) => assert_eq!(code, 2),
        other => panic!("expected contract violation, got {other:?}"),
    }
}

#[tokio::test]
async fn backup_adapter_dropping_the_handler_reports_failure() {
    let (mut controller, mut calls) = open_screen("1234", KeyboardMode::Numeric);
    controller.set_user_entry("1234");
    controller.confirm().unwrap();

    let (_, _, handler) = next_call(&mut calls).await;
    drop(handler);
    let response = next_response(&mut controller).await;
    controller.handle_response(response).unwrap();

    assert_eq!(controller.save_animation(), SaveAnimation::Failure);
}

#[tokio::test]
async fn late_result_for_closed_screen_is_ignored() {
    let (mut controller, mut calls) = open_screen("1234", KeyboardMode::Numeric);
    controller.set_user_entry("1234");
    controller.confirm().unwrap();

    let (_, _, handler) = next_call(&mut calls).await;
    drop(controller);
    handler.complete(PinSetResult::Success);
}

#[tokio::test]
async fn observers_see_each_change_once() {
    let (mut controller, mut calls) = open_screen("1234", KeyboardMode::Numeric);
    let mut streams = controller.streams();

    let next = |label: Option<Label>| label.expect("label stream ended");
    assert_eq!(next(streams.label.next().await), Label::ReEnterPin);
    assert_eq!(
        streams.save_animation.next().await,
        Some(SaveAnimation::None)
    );

    controller.set_user_entry("1234");
    controller.confirm().unwrap();
    assert_eq!(next(streams.label.next().await), Label::CreatingPin);
    assert_eq!(
        streams.save_animation.next().await,
        Some(SaveAnimation::Loading)
    );

    let (_, _, handler) = next_call(&mut calls).await;
    handler.complete(PinSetResult::Success);
    let response = next_response(&mut controller).await;
    controller.handle_response(response).unwrap();
    assert_eq!(
        streams.save_animation.next().await,
        Some(SaveAnimation::Success)
    );

    controller.on_loading_animation_complete();
    controller.on_loading_animation_complete();
    assert_eq!(next(streams.label.next().await), Label::Empty);
    assert!(
        timeout(Duration::from_millis(50), streams.label.next())
            .await
            .is_err(),
        "duplicate label must not be emitted"
    );
}
