//! Subscriber store backed by `notifications_subscribers`.

use chrono::Utc;
use diesel::prelude::*;
use tracing::info;

use super::connection::DbPool;
use super::model::{NewSubscriberRow, SubscriberRow, DISABLED, ENABLED};
use super::schema::notifications_subscribers::dsl;
use crate::domain::{Audience, NewSubscriber, Subscriber};
use crate::error::{Error, Result};
use crate::port::outbound::SubscriberStore;

/// PostgreSQL-backed [`SubscriberStore`].
pub struct PgSubscriberStore {
    pool: DbPool,
}

impl PgSubscriberStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl SubscriberStore for PgSubscriberStore {
    fn register(&self, chat: &NewSubscriber) -> Result<Subscriber> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let now = Utc::now();
        let row: SubscriberRow = diesel::insert_into(dsl::notifications_subscribers)
            .values(NewSubscriberRow::new(chat, now))
            .on_conflict(dsl::telegram_id)
            .do_update()
            .set((
                dsl::is_enabled.eq(ENABLED),
                dsl::telegram_first_name.eq(&chat.first_name),
                dsl::telegram_last_name.eq(&chat.last_name),
                dsl::telegram_username.eq(&chat.username),
                dsl::updated_at.eq(now),
            ))
            .returning(SubscriberRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        if row.updated_at.is_none() {
            info!(telegram_id = row.telegram_id, "New subscriber registered");
        }

        Ok(row.into())
    }

    fn enabled(&self, audience: Audience) -> Result<Vec<Subscriber>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let mut query = dsl::notifications_subscribers
            .filter(dsl::is_enabled.eq(ENABLED))
            .order(dsl::id.asc())
            .select(SubscriberRow::as_select())
            .into_boxed();

        if let Some(telegram_id) = audience.telegram_id() {
            query = query.filter(dsl::telegram_id.eq(telegram_id));
        }

        let rows: Vec<SubscriberRow> = query
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Subscriber::from).collect())
    }

    fn disable(&self, subscriber_id: i64) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::update(dsl::notifications_subscribers.find(subscriber_id))
            .set((dsl::is_enabled.eq(DISABLED), dsl::updated_at.eq(Utc::now())))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        info!(subscriber_id, "Subscriber disabled");
        Ok(())
    }
}
