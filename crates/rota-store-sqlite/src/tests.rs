use chrono::NaiveDate;

use rota_core::{
  Error,
  model::{DutySchedulePatch, NewDutyScheduleEntry, NewPersonnel, NewZvksBooking},
  store::RosterStore,
  temporal::TimeOfDay,
};

use crate::SqliteStore;

fn date(s: &str) -> NaiveDate { s.parse().unwrap() }
fn tod(s: &str) -> TimeOfDay { s.parse().unwrap() }

fn zvks_input(comm: &str, cmd: &str) -> NewZvksBooking {
  NewZvksBooking {
    who_position:      "duty officer".into(),
    who_name:          "Ivanov".into(),
    with_position:     "commander".into(),
    with_name:         "Petrov".into(),
    communicator_time: tod(comm),
    commander_time:    tod(cmd),
  }
}

#[tokio::test]
async fn combat_post_round_trip() {
  let store = SqliteStore::open_in_memory().await.unwrap();

  let post = store.create_combat_post("BP-1".into()).await.unwrap();
  assert_eq!(post.name, "BP-1");

  let updated = store
    .update_combat_post(post.id, "BP-1 (north)".into())
    .await
    .unwrap();
  assert_eq!(updated.id, post.id);

  let all = store.list_combat_posts().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].name, "BP-1 (north)");

  let missing = store.update_combat_post(999, "x".into()).await;
  assert!(matches!(missing, Err(Error::NotFound { entity: "combat post", .. })));
}

#[tokio::test]
async fn ranks_are_seeded_once() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let ranks = store.list_ranks().await.unwrap();
  assert_eq!(ranks.len(), 10);
  assert_eq!(ranks[0].name, "Private");
  assert_eq!(ranks[9].name, "Colonel");
}

#[tokio::test]
async fn personnel_membership_set_is_replaced_on_update() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let post = store.create_combat_post("BP-1".into()).await.unwrap();
  let team_a = store.create_duty_team("shift A".into(), post.id).await.unwrap();
  let team_b = store.create_duty_team("shift B".into(), post.id).await.unwrap();

  let person = store
    .create_personnel(NewPersonnel {
      name:          "Sidorov".into(),
      rank_id:       1,
      duty_team_ids: vec![team_a.id, team_a.id, team_b.id],
    })
    .await
    .unwrap();
  // Duplicate ids collapse.
  assert_eq!(person.duty_team_ids, vec![team_a.id, team_b.id]);

  let updated = store
    .update_personnel(person.id, NewPersonnel {
      name:          "Sidorov".into(),
      rank_id:       2,
      duty_team_ids: vec![team_b.id],
    })
    .await
    .unwrap();
  assert_eq!(updated.duty_team_ids, vec![team_b.id]);

  let listed = store.list_personnel().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].rank_id, 2);
  assert_eq!(listed[0].duty_team_ids, vec![team_b.id]);
}

#[tokio::test]
async fn deleting_a_post_cascades_to_teams_and_sole_members() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let post = store.create_combat_post("BP-1".into()).await.unwrap();
  let other = store.create_combat_post("BP-2".into()).await.unwrap();
  let team = store.create_duty_team("shift A".into(), post.id).await.unwrap();
  let kept_team = store.create_duty_team("shift K".into(), other.id).await.unwrap();

  // Sole member of the doomed team: goes with it.
  store
    .create_personnel(NewPersonnel {
      name:          "Orlov".into(),
      rank_id:       1,
      duty_team_ids: vec![team.id],
    })
    .await
    .unwrap();
  // Member of both: survives with the other membership.
  let shared = store
    .create_personnel(NewPersonnel {
      name:          "Volkov".into(),
      rank_id:       1,
      duty_team_ids: vec![team.id, kept_team.id],
    })
    .await
    .unwrap();

  store.delete_combat_post(post.id).await.unwrap();

  let teams = store.list_duty_teams().await.unwrap();
  assert_eq!(teams.len(), 1);
  assert_eq!(teams[0].id, kept_team.id);

  let people = store.list_personnel().await.unwrap();
  assert_eq!(people.len(), 1);
  assert_eq!(people[0].id, shared.id);
  assert_eq!(people[0].duty_team_ids, vec![kept_team.id]);
}

#[tokio::test]
async fn duty_schedule_create_guards_against_double_planning() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let d = date("2025-03-10");

  let entry = store
    .create_duty_schedule(NewDutyScheduleEntry {
      date:                 d,
      duty_team_id:         1,
      planned_personnel_id: 7,
    })
    .await
    .unwrap();
  // Actual starts equal to planned.
  assert_eq!(entry.actual_personnel_id, 7);

  // Same person, same date, different team: conflict.
  let dup = store
    .create_duty_schedule(NewDutyScheduleEntry {
      date:                 d,
      duty_team_id:         2,
      planned_personnel_id: 7,
    })
    .await;
  assert!(matches!(dup, Err(Error::DuplicateAssignment { personnel_id: 7, .. })));

  // Same person on another date is fine.
  store
    .create_duty_schedule(NewDutyScheduleEntry {
      date:                 date("2025-03-11"),
      duty_team_id:         2,
      planned_personnel_id: 7,
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn duty_schedule_partial_update() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let entry = store
    .create_duty_schedule(NewDutyScheduleEntry {
      date:                 date("2025-03-10"),
      duty_team_id:         1,
      planned_personnel_id: 7,
    })
    .await
    .unwrap();

  let empty = store
    .update_duty_schedule(entry.id, DutySchedulePatch::default())
    .await;
  assert!(matches!(empty, Err(Error::EmptyUpdate)));

  let patched = store
    .update_duty_schedule(entry.id, DutySchedulePatch {
      actual_personnel_id: Some(9),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(patched.planned_personnel_id, 7);
  assert_eq!(patched.actual_personnel_id, 9);

  let missing = store
    .update_duty_schedule(999, DutySchedulePatch {
      actual_personnel_id: Some(9),
      ..Default::default()
    })
    .await;
  assert!(matches!(
    missing,
    Err(Error::NotFound { entity: "duty schedule entry", .. })
  ));
}

#[tokio::test]
async fn duty_schedule_month_and_year_filters() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  for (d, person) in [
    ("2025-03-10", 1),
    ("2025-03-31", 2),
    ("2025-04-01", 3),
    ("2024-03-15", 4),
  ] {
    store
      .create_duty_schedule(NewDutyScheduleEntry {
        date:                 date(d),
        duty_team_id:         1,
        planned_personnel_id: person,
      })
      .await
      .unwrap();
  }

  let march = store.list_duty_schedule_for_month(2025, 3).await.unwrap();
  assert_eq!(march.len(), 2);

  let year = store.list_duty_schedule_for_year(2025).await.unwrap();
  assert_eq!(year.len(), 3);

  let day = store.list_duty_schedule(date("2025-03-10")).await.unwrap();
  assert_eq!(day.len(), 1);
  assert_eq!(day[0].planned_personnel_id, 1);
}

#[tokio::test]
async fn shift_composition_survives_deleted_references() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let post = store.create_combat_post("BP-1".into()).await.unwrap();
  let team = store.create_duty_team("shift A".into(), post.id).await.unwrap();
  let person = store
    .create_personnel(NewPersonnel {
      name:          "Ivanov".into(),
      rank_id:       1,
      duty_team_ids: vec![team.id],
    })
    .await
    .unwrap();

  let d = date("2025-03-10");
  store
    .create_duty_schedule(NewDutyScheduleEntry {
      date:                 d,
      duty_team_id:         team.id,
      planned_personnel_id: person.id,
    })
    .await
    .unwrap();

  let composition = store.shift_composition(d).await.unwrap();
  assert_eq!(composition.len(), 1);
  assert_eq!(composition[0].duty_team_name.as_deref(), Some("shift A"));
  assert_eq!(composition[0].actual_personnel_name.as_deref(), Some("Ivanov"));

  // Deleting the person leaves the entry; the join goes NULL.
  store.delete_personnel(person.id).await.unwrap();
  let composition = store.shift_composition(d).await.unwrap();
  assert_eq!(composition.len(), 1);
  assert_eq!(composition[0].actual_personnel_name, None);
}

#[tokio::test]
async fn schedule_delete_of_missing_event_is_not_found() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let event = store
    .create_schedule_event(tod("09:30"), "morning briefing".into())
    .await
    .unwrap();

  store.delete_schedule_event(event.id).await.unwrap();
  let again = store.delete_schedule_event(event.id).await;
  assert!(matches!(
    again,
    Err(Error::NotFound { entity: "schedule event", .. })
  ));
}

#[tokio::test]
async fn schedule_ordered_listing_sorts_by_time() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  for (time, event) in [("14:00", "lunch"), ("06:30", "reveille"), ("09:30", "briefing")] {
    store.create_schedule_event(tod(time), event.into()).await.unwrap();
  }

  let ordered = store.list_schedule_ordered().await.unwrap();
  let times: Vec<String> = ordered.iter().map(|e| e.time.to_string()).collect();
  assert_eq!(times, ["06:30", "09:30", "14:00"]);

  // Unordered listing keeps insertion order.
  let raw = store.list_schedule().await.unwrap();
  assert_eq!(raw[0].event, "lunch");
}

#[tokio::test]
async fn zvks_expiry_sweep_matches_the_exact_minute_only() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  store.create_zvks(zvks_input("13:00", "14:04")).await.unwrap();
  let dies = store.create_zvks(zvks_input("13:00", "14:05")).await.unwrap();
  store.create_zvks(zvks_input("13:00", "14:06")).await.unwrap();

  let removed = store.delete_zvks_expiring_at("14:05".into()).await.unwrap();
  assert_eq!(removed, 1);

  let left = store.list_zvks().await.unwrap();
  assert_eq!(left.len(), 2);
  assert!(left.iter().all(|b| b.id != dies.id));

  // Earlier minutes are not swept retroactively.
  let removed = store.delete_zvks_expiring_at("14:07".into()).await.unwrap();
  assert_eq!(removed, 0);
}

#[tokio::test]
async fn zvks_update_and_delete_require_an_existing_row() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let booking = store.create_zvks(zvks_input("10:00", "11:00")).await.unwrap();

  let updated = store
    .update_zvks(booking.id, zvks_input("10:30", "11:30"))
    .await
    .unwrap();
  assert_eq!(updated.communicator_time, tod("10:30"));

  store.delete_zvks(booking.id).await.unwrap();
  let gone = store.delete_zvks(booking.id).await;
  assert!(matches!(gone, Err(Error::NotFound { entity: "zvks booking", .. })));
}

#[tokio::test]
async fn orders_filter_by_entry_set_and_clear_all() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let a = store.create_order(1, "ord-17".into()).await.unwrap();
  store.create_order(2, "ord-18".into()).await.unwrap();
  store.create_order(3, "ord-19".into()).await.unwrap();

  let subset = store.list_orders_for_entries(vec![1, 3]).await.unwrap();
  assert_eq!(subset.len(), 2);

  let none = store.list_orders_for_entries(Vec::new()).await.unwrap();
  assert!(none.is_empty());

  let renumbered = store
    .update_order_number(a.id, "ord-17a".into())
    .await
    .unwrap();
  assert_eq!(renumbered.order_number, "ord-17a");
  assert_eq!(renumbered.duty_schedule_id, 1);

  store.clear_orders().await.unwrap();
  let after = store.list_orders_for_entries(vec![1, 2, 3]).await.unwrap();
  assert!(after.is_empty());
}

#[tokio::test]
async fn notes_table_holds_a_single_row_across_dates() {
  let store = SqliteStore::open_in_memory().await.unwrap();

  let first = store
    .upsert_note(date("2025-03-10"), "check the generator".into())
    .await
    .unwrap();
  let second = store
    .upsert_note(date("2025-03-11"), "generator checked".into())
    .await
    .unwrap();
  // Different submitted date, same row.
  assert_eq!(first.id, second.id);

  let notes = store.list_notes().await.unwrap();
  assert_eq!(notes.len(), 1);
  assert_eq!(notes[0].content, "generator checked");
  assert_eq!(notes[0].date, date("2025-03-11"));
}
