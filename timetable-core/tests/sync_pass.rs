use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use timetable_core::constants::DEFAULT_TIMEZONE;
use timetable_core::identity::IdentityKey;
use timetable_core::reconcile::DiffKind;
use timetable_core::reminder::ReminderPolicy;
use timetable_core::store::{CalendarStore, NotifyPolicy, ScheduleSource};
use timetable_core::sync::{SyncSettings, plan_pass, run_pass};
use timetable_core::{
    LessonOccurrence, LessonRow, RawRow, RemoteEvent, ScheduleQuery, ScheduleType, TimetableError,
    TimetableResult,
};

struct FakeSource {
    rows: Mutex<Vec<RawRow>>,
}

impl FakeSource {
    fn new(rows: Vec<RawRow>) -> Self {
        FakeSource {
            rows: Mutex::new(rows),
        }
    }

    fn set_rows(&self, rows: Vec<RawRow>) {
        *self.rows.lock().unwrap() = rows;
    }
}

impl ScheduleSource for FakeSource {
    async fn fetch_schedule(&self, _query: &ScheduleQuery) -> TimetableResult<Vec<RawRow>> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

struct FailingSource;

impl ScheduleSource for FailingSource {
    async fn fetch_schedule(&self, _query: &ScheduleQuery) -> TimetableResult<Vec<RawRow>> {
        Err(TimetableError::Source("connection refused".to_string()))
    }
}

#[derive(Default)]
struct FakeStore {
    events: Mutex<Vec<RemoteEvent>>,
    next_id: Mutex<usize>,
    notifications: Mutex<Vec<NotifyPolicy>>,
    /// Mutations allowed before every further one fails.
    fail_after: Mutex<Option<usize>>,
}

impl FakeStore {
    fn events(&self) -> Vec<RemoteEvent> {
        self.events.lock().unwrap().clone()
    }

    fn check_failure(&self, notify: NotifyPolicy) -> TimetableResult<()> {
        let mut fail_after = self.fail_after.lock().unwrap();
        if let Some(remaining) = fail_after.as_mut() {
            if *remaining == 0 {
                return Err(TimetableError::Store("quota exceeded".to_string()));
            }
            *remaining -= 1;
        }
        self.notifications.lock().unwrap().push(notify);
        Ok(())
    }

    fn to_remote(id: String, occurrence: &LessonOccurrence) -> RemoteEvent {
        RemoteEvent {
            id,
            summary: occurrence.summary(),
            description: Some(occurrence.description()),
            location: occurrence.location(),
            start: occurrence.start.with_timezone(&Utc),
            end: occurrence.end.with_timezone(&Utc),
            reminder_minutes: occurrence.reminder_minutes,
            color_id: occurrence.color_id.map(str::to_string),
        }
    }
}

impl CalendarStore for FakeStore {
    async fn list_events(&self, from: DateTime<Utc>) -> TimetableResult<Vec<RemoteEvent>> {
        Ok(self
            .events()
            .into_iter()
            .filter(|event| event.end >= from)
            .collect())
    }

    async fn create_event(&self, occurrence: &LessonOccurrence, notify: NotifyPolicy) -> TimetableResult<()> {
        self.check_failure(notify)?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let event = Self::to_remote(format!("evt-{}", *next_id), occurrence);
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn update_event(
        &self,
        existing_id: &str,
        occurrence: &LessonOccurrence,
        notify: NotifyPolicy,
    ) -> TimetableResult<()> {
        self.check_failure(notify)?;
        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.id == existing_id)
            .ok_or_else(|| TimetableError::Store(format!("no event {existing_id}")))?;
        *event = Self::to_remote(existing_id.to_string(), occurrence);
        Ok(())
    }

    async fn delete_event(&self, existing_id: &str, notify: NotifyPolicy) -> TimetableResult<()> {
        self.check_failure(notify)?;
        self.events.lock().unwrap().retain(|e| e.id != existing_id);
        Ok(())
    }
}

fn local(d: u32, h: u32, m: u32) -> DateTime<Tz> {
    DEFAULT_TIMEZONE.with_ymd_and_hms(2025, 9, d, h, m, 0).unwrap()
}

fn settings(reminders: ReminderPolicy) -> SyncSettings {
    SyncSettings {
        query: ScheduleQuery {
            semester_id: 42,
            schedule_type: ScheduleType::ByGroup,
            subject_id: 1001,
        },
        reminders,
    }
}

fn lesson(time_range: &str, weeks: &str, subject: &str, room: &str) -> RawRow {
    RawRow::Lesson(LessonRow {
        time_range: time_range.to_string(),
        weeks: weeks.to_string(),
        subject: subject.to_string(),
        lesson_type: "Лекция".to_string(),
        counterpart: "Иванов И.И.".to_string(),
        room: room.to_string(),
        comment: String::new(),
    })
}

fn week_rows() -> Vec<RawRow> {
    vec![
        RawRow::DayHeader("Понедельник".to_string()),
        lesson("08:00-09:35", "1 2 3", "Физика", "101"),
        lesson("09:35-11:05", "1 3", "Химия", "202"),
        RawRow::NoInfo,
        RawRow::DayHeader("Вторник".to_string()),
        RawRow::NoInfo,
        lesson("11:35-13:05", "2", "История", ""),
    ]
}

#[tokio::test]
async fn single_lesson_end_to_end() {
    let source = FakeSource::new(vec![
        RawRow::DayHeader("Понедельник".to_string()),
        lesson("08:00-09:35", "1", "Физика", "101"),
    ]);
    let store = FakeStore::default();
    let settings = settings(ReminderPolicy::default());
    let now = local(1, 7, 0);

    let plan = plan_pass(&source, &store, &settings, now).await.unwrap();
    assert_eq!(plan.operations.len(), 1);
    assert_eq!(plan.count(DiffKind::Create), 1);

    let report = run_pass(&source, &store, &settings, now).await.unwrap();
    assert_eq!(report.created, 1);

    let events = store.events();
    assert_eq!(events.len(), 1);
    let expected = IdentityKey::compute(
        "1. Физика — Лекция",
        Some("Преподаватель: Иванов И.И."),
        Some("101"),
        &local(1, 8, 0).naive_local(),
    );
    assert_eq!(events[0].identity(DEFAULT_TIMEZONE), expected);

    let plan = plan_pass(&source, &store, &settings, now).await.unwrap();
    assert!(plan.is_empty());
}

#[tokio::test]
async fn second_pass_is_empty() {
    let source = FakeSource::new(week_rows());
    let store = FakeStore::default();
    let settings = settings(ReminderPolicy {
        first_lesson: Some(60),
        subsequent: Some(15),
    });
    let now = local(1, 7, 0);

    let report = run_pass(&source, &store, &settings, now).await.unwrap();
    assert_eq!(report.created, 6);
    assert_eq!(report.updated, 0);
    assert_eq!(report.deleted, 0);

    let report = run_pass(&source, &store, &settings, now).await.unwrap();
    assert_eq!(report, Default::default());

    // Every mutation notifies all participants
    assert!(
        store
            .notifications
            .lock()
            .unwrap()
            .iter()
            .all(|n| *n == NotifyPolicy::All)
    );
}

#[tokio::test]
async fn removed_lessons_are_deleted_and_changed_reminders_updated() {
    let source = FakeSource::new(week_rows());
    let store = FakeStore::default();
    let now = local(1, 7, 0);

    let reminders = ReminderPolicy {
        first_lesson: Some(60),
        subsequent: Some(15),
    };
    run_pass(&source, &store, &settings(reminders), now).await.unwrap();

    // Chemistry disappears and the subsequent-lesson reminder changes
    let mut rows = week_rows();
    rows.remove(2);
    source.set_rows(rows);
    let reminders = ReminderPolicy {
        first_lesson: Some(60),
        subsequent: Some(5),
    };

    let report = run_pass(&source, &store, &settings(reminders), now).await.unwrap();
    assert_eq!(report.deleted, 2);
    assert_eq!(report.created, 0);
    // Physics and History open their days, so their reminders are unchanged
    assert_eq!(report.updated, 0);
    assert_eq!(store.events().len(), 4);

    let report = run_pass(&source, &store, &settings(reminders), now).await.unwrap();
    assert_eq!(report, Default::default());
}

#[tokio::test]
async fn reminder_change_updates_in_place() {
    let source = FakeSource::new(week_rows());
    let store = FakeStore::default();
    let now = local(1, 7, 0);

    run_pass(&source, &store, &settings(ReminderPolicy::default()), now)
        .await
        .unwrap();
    let ids_before: Vec<_> = store.events().into_iter().map(|e| e.id).collect();

    let reminders = ReminderPolicy {
        first_lesson: Some(30),
        subsequent: None,
    };
    let report = run_pass(&source, &store, &settings(reminders), now).await.unwrap();

    // Physics weeks 1..3 and History are first lessons, Chemistry is not
    assert_eq!(report.updated, 4);
    assert_eq!(report.created, 0);
    assert_eq!(report.deleted, 0);

    let ids_after: Vec<_> = store.events().into_iter().map(|e| e.id).collect();
    assert_eq!(ids_before, ids_after);
}

#[tokio::test]
async fn past_events_survive_source_removal() {
    let source = FakeSource::new(week_rows());
    let store = FakeStore::default();
    let settings = settings(ReminderPolicy::default());

    run_pass(&source, &store, &settings, local(1, 7, 0)).await.unwrap();
    assert_eq!(store.events().len(), 6);

    // A week later the source drops everything; week 1 events are in the past
    source.set_rows(Vec::new());
    let report = run_pass(&source, &store, &settings, local(8, 7, 0)).await.unwrap();

    assert_eq!(report.deleted, 4);
    let remaining = store.events();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|e| e.end < local(8, 7, 0).with_timezone(&Utc)));
}

#[tokio::test]
async fn failed_pass_converges_on_next_pass() {
    let source = FakeSource::new(week_rows());
    let store = FakeStore::default();
    let settings = settings(ReminderPolicy::default());
    let now = local(1, 7, 0);

    *store.fail_after.lock().unwrap() = Some(2);
    let err = run_pass(&source, &store, &settings, now).await.unwrap_err();
    assert!(matches!(err, TimetableError::Store(_)));
    assert_eq!(store.events().len(), 2);

    *store.fail_after.lock().unwrap() = None;
    let report = run_pass(&source, &store, &settings, now).await.unwrap();
    assert_eq!(report.created, 4);

    let report = run_pass(&source, &store, &settings, now).await.unwrap();
    assert_eq!(report, Default::default());
}

#[tokio::test]
async fn source_failure_aborts_before_any_mutation() {
    let store = FakeStore::default();
    let settings = settings(ReminderPolicy::default());

    let err = run_pass(&FailingSource, &store, &settings, local(1, 7, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, TimetableError::Source(_)));
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn malformed_row_aborts_pass() {
    let source = FakeSource::new(vec![
        RawRow::DayHeader("Понедельник".to_string()),
        lesson("08:00-09:35", "1", "Физика", "101"),
        lesson("08:10-09:35", "1", "Химия", "101"),
    ]);
    let store = FakeStore::default();

    let err = run_pass(&source, &store, &settings(ReminderPolicy::default()), local(1, 7, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, TimetableError::UnknownSlot(_)));
    assert!(store.events().is_empty());
}
