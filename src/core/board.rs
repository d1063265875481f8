//! The intimation board: list views, dashboard counters, intake and deletion
//! over an injected store and sound sink.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use super::alerts::engine::{self, Evaluation};
use super::alerts::sound::AlertSink;
use super::error::{Error, StoreError};
use super::intake::{self, IntakeForm};
use super::model::{Intimation, Priority};
use super::store::IntimationStore;

/// One rendered row of a priority list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: i64,
    pub app_name: String,
    pub sender: String,
    pub description: String,
    pub priority: Priority,
    pub viewed: bool,
    pub alerts_fired: u32,
    pub ceiling: u32,
    /// Alerted during this render
    pub pulse: bool,
}

impl ItemView {
    fn from_evaluation(eval: &Evaluation) -> Self {
        let item = &eval.item;
        Self {
            id: item.id,
            app_name: item.app_name.clone(),
            sender: item.sender.clone(),
            description: item.description.clone(),
            priority: item.priority,
            viewed: item.has_been_viewed,
            alerts_fired: item.alert_count,
            ceiling: engine::display_ceiling(item.priority),
            pulse: eval.should_alert,
        }
    }

    pub fn badge(&self) -> &'static str {
        if self.viewed {
            "● SEEN"
        } else {
            "○ UNREAD"
        }
    }
}

/// Active intimations per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl Counts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

pub struct Board<S, A> {
    store: S,
    sound: A,
}

impl<S: IntimationStore, A: AlertSink> Board<S, A> {
    pub fn new(store: S, sound: A) -> Self {
        Self { store, sound }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sound(&self) -> &A {
        &self.sound
    }

    /// Render the active intimations of one tier.
    ///
    /// Every rendered record goes through the alert engine and is written
    /// back in place. No sound plays here: items that alerted carry `pulse`
    /// and are sounded by [`Board::announce`] once the views are shown.
    pub fn render<Tz: TimeZone>(
        &self,
        priority: Priority,
        now: &DateTime<Tz>,
    ) -> Result<Vec<ItemView>, StoreError> {
        let mut items = self.store.load();
        let now_utc = now.with_timezone(&Utc);

        let evaluations: Vec<(usize, Evaluation)> = items
            .iter()
            .enumerate()
            .filter(|(_, n)| n.priority == priority && n.is_active(now_utc))
            .map(|(pos, n)| (pos, engine::evaluate(n, now)))
            .collect();

        if evaluations.is_empty() {
            return Ok(Vec::new());
        }

        for (pos, eval) in &evaluations {
            items[*pos] = eval.item.clone();
        }
        self.store.save(&items)?;

        Ok(evaluations
            .iter()
            .map(|(_, eval)| ItemView::from_evaluation(eval))
            .collect())
    }

    /// Play the alert sound once per item that alerted during its render.
    /// Failures are logged and dropped. Returns how many alerts were sounded.
    pub fn announce(&self, views: &[ItemView]) -> usize {
        let mut sounded = 0;
        for view in views.iter().filter(|v| v.pulse) {
            log::info!("Alerting for {} ({})", view.app_name, view.id);
            if let Err(e) = self.sound.play() {
                log::warn!("Alert sound blocked: {}", e);
            }
            sounded += 1;
        }
        sounded
    }

    /// Count active intimations per tier over the whole stored list.
    pub fn counts<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Counts {
        let now_utc = now.with_timezone(&Utc);
        let mut counts = Counts::default();
        for item in self.store.load().iter().filter(|n| n.is_active(now_utc)) {
            match item.priority {
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
                Priority::Low => counts.low += 1,
            }
        }
        counts
    }

    /// Validate the form and append the new intimation. Nothing is written on rejection.
    pub fn submit<Tz: TimeZone>(
        &self,
        form: &IntakeForm,
        now: &DateTime<Tz>,
    ) -> Result<Intimation, Error> {
        let submission = intake::validate(form)?;

        let mut items = self.store.load();
        let id = intake::next_id(&items, now.timestamp_millis()).ok_or(Error::IdsExhausted)?;
        let created = submission.into_intimation(id, now)?;

        items.push(created.clone());
        self.store.save(&items)?;
        log::info!(
            "Added {} intimation {} for {}",
            created.priority,
            created.id,
            created.app_name
        );
        Ok(created)
    }

    /// Remove the intimation with `id`. Returns whether anything was removed.
    pub fn remove(&self, id: i64) -> Result<bool, StoreError> {
        let mut items = self.store.load();
        let before = items.len();
        items.retain(|n| n.id != id);

        if items.len() == before {
            log::debug!("No intimation with id {}", id);
            return Ok(false);
        }
        self.store.save(&items)?;
        Ok(true)
    }

    /// Remove `id` and re-render the calling tier's list.
    pub fn delete<Tz: TimeZone>(
        &self,
        id: i64,
        priority: Priority,
        now: &DateTime<Tz>,
    ) -> Result<Vec<ItemView>, StoreError> {
        self.remove(id)?;
        self.render(priority, now)
    }

    /// Drop every stored intimation.
    pub fn wipe(&self) -> Result<(), StoreError> {
        log::info!("Wiping all intimations");
        self.store.clear()
    }
}
