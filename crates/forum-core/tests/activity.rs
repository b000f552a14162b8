mod common;

use std::sync::{Arc, Mutex};

use entity::activity::{self, ActivityKind};
use forum_core::activity::{label, ActivityLog, ActivityObserver, ActivitySubject};
use forum_core::clock::FixedClock;
use forum_core::error::ActivityError;

const T0: i64 = 1_770_000_000;

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<activity::Model>>,
}

impl ActivityObserver for Recorder {
    fn on_activity(&self, record: &activity::Model) {
        self.seen.lock().unwrap().push(record.clone());
    }
}

#[tokio::test]
async fn recording_notifies_each_observer_exactly_once() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let question = common::insert_question(&db, &alice.id, "How do I ask?").await;

    let recorder = Arc::new(Recorder::default());
    let mut log = ActivityLog::new(db.clone(), Arc::new(FixedClock::new(T0)));
    log.register(recorder.clone());

    let record = log
        .record(&alice.id, ActivityKind::AskQuestion, ActivitySubject::Question(question.id))
        .await
        .expect("record");

    let seen = recorder.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], record);
    assert_eq!(record.occurred_at, T0);
    assert!(!record.audited);
}

#[tokio::test]
async fn recording_without_observers_is_a_no_op_emit() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let question = common::insert_question(&db, &alice.id, "Quiet?").await;

    let log = ActivityLog::new(db.clone(), Arc::new(FixedClock::new(T0)));
    log.record(&alice.id, ActivityKind::AskQuestion, ActivitySubject::Question(question.id))
        .await
        .expect("record");
}

#[tokio::test]
async fn resolve_question_walks_the_content_graph() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let bob = common::insert_user(&db, "bob").await;
    let question = common::insert_question(&db, &alice.id, "What is ownership?").await;
    let answer = common::insert_answer(&db, &question.id, &bob.id).await;
    let q_comment = common::insert_comment(&db, &bob.id, Some(&question.id), None).await;
    let a_comment = common::insert_comment(&db, &alice.id, None, Some(&answer.id)).await;

    let log = ActivityLog::new(db.clone(), Arc::new(FixedClock::new(T0)));

    let cases = [
        (ActivityKind::AskQuestion, ActivitySubject::Question(question.id.clone())),
        (ActivityKind::UpdateQuestion, ActivitySubject::Question(question.id.clone())),
        (ActivityKind::Answer, ActivitySubject::Answer(answer.id.clone())),
        (ActivityKind::MarkAnswer, ActivitySubject::Answer(answer.id.clone())),
        (ActivityKind::UpdateAnswer, ActivitySubject::Answer(answer.id.clone())),
        (ActivityKind::CommentQuestion, ActivitySubject::QuestionComment(q_comment.id.clone())),
        (ActivityKind::CommentAnswer, ActivitySubject::AnswerComment(a_comment.id.clone())),
    ];

    for (kind, subject) in cases {
        let actor = if kind == ActivityKind::AskQuestion { &alice.id } else { &bob.id };
        let record = log.record(actor, kind, subject).await.expect("record");
        let resolved = log.resolve_question(&record).await.expect("resolve");
        assert_eq!(resolved.id, question.id, "kind {kind:?}");
    }
}

#[tokio::test]
async fn kind_subject_mismatch_is_a_loud_error() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let question = common::insert_question(&db, &alice.id, "Mismatched").await;

    let log = ActivityLog::new(db.clone(), Arc::new(FixedClock::new(T0)));

    // Writing the malformed pairing succeeds; only the derived view trips.
    let record = log
        .record(&alice.id, ActivityKind::Answer, ActivitySubject::Question(question.id))
        .await
        .expect("record");

    let result = log.resolve_question(&record).await;
    assert!(matches!(result, Err(ActivityError::SubjectMismatch { .. })));
}

#[tokio::test]
async fn dangling_subject_is_reported_missing() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let question = common::insert_question(&db, &alice.id, "Gone soon").await;
    let answer = common::insert_answer(&db, &question.id, &alice.id).await;

    let log = ActivityLog::new(db.clone(), Arc::new(FixedClock::new(T0)));
    let record = log
        .record(&alice.id, ActivityKind::Answer, ActivitySubject::Answer(answer.id.clone()))
        .await
        .expect("record");

    use sea_orm::EntityTrait;
    entity::Answer::delete_by_id(answer.id.as_str())
        .exec(&db)
        .await
        .expect("delete answer");

    let result = log.resolve_question(&record).await;
    assert!(matches!(result, Err(ActivityError::MissingSubject(_))));
}

#[tokio::test]
async fn mark_audited_flips_the_flag() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let question = common::insert_question(&db, &alice.id, "Audit me").await;

    let log = ActivityLog::new(db.clone(), Arc::new(FixedClock::new(T0)));
    let record = log
        .record(&alice.id, ActivityKind::AskQuestion, ActivitySubject::Question(question.id))
        .await
        .expect("record");
    assert!(!record.audited);

    let audited = log.mark_audited(record).await.expect("mark audited");
    assert!(audited.audited);
}

#[test]
fn labels_cover_every_kind() {
    assert_eq!(label(ActivityKind::AskQuestion), "asked");
    assert_eq!(label(ActivityKind::Answer), "answered");
    assert_eq!(label(ActivityKind::MarkAnswer), "marked an answer");
    assert_eq!(label(ActivityKind::UpdateQuestion), "edited");
    assert_eq!(label(ActivityKind::CommentQuestion), "commented");
    assert_eq!(label(ActivityKind::CommentAnswer), "commented an answer");
    assert_eq!(label(ActivityKind::UpdateAnswer), "edited an answer");
}
