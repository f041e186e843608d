use shared::models::{Settings, SettingsUpdate};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct SettingsRow {
    id: i64,
    platform_name: String,
    contact_email: String,
    support_phone: String,
    updated_at: i64,
}

impl SettingsRow {
    fn into_model(self) -> Settings {
        Settings {
            id: self.id,
            platform_name: self.platform_name,
            contact_email: self.contact_email,
            support_phone: self.support_phone,
            updated_at: self.updated_at,
        }
    }
}

/// Read the singleton row, creating it with defaults on first access
pub async fn get_or_create(pool: &PgPool, now: i64) -> Result<Settings, sqlx::Error> {
    let defaults = Settings::default_row(now);
    sqlx::query(
        "INSERT INTO settings (id, platform_name, contact_email, support_phone, updated_at)
         VALUES (1, $1, $2, $3, $4)
         ON CONFLICT (id) DO NOTHING",
    )
    .bind(&defaults.platform_name)
    .bind(&defaults.contact_email)
    .bind(&defaults.support_phone)
    .bind(now)
    .execute(pool)
    .await?;

    let row: SettingsRow = sqlx::query_as("SELECT * FROM settings WHERE id = 1")
        .fetch_one(pool)
        .await?;
    Ok(row.into_model())
}

/// Upsert the singleton row; last writer wins
pub async fn upsert(
    pool: &PgPool,
    update: &SettingsUpdate,
    now: i64,
) -> Result<Settings, sqlx::Error> {
    let defaults = Settings::default_row(now);
    let row: SettingsRow = sqlx::query_as(
        "INSERT INTO settings (id, platform_name, contact_email, support_phone, updated_at)
         VALUES (1, COALESCE($1, $4), COALESCE($2, $5), COALESCE($3, $6), $7)
         ON CONFLICT (id) DO UPDATE SET
             platform_name = COALESCE($1, settings.platform_name),
             contact_email = COALESCE($2, settings.contact_email),
             support_phone = COALESCE($3, settings.support_phone),
             updated_at = $7
         RETURNING *",
    )
    .bind(update.platform_name.as_deref())
    .bind(update.contact_email.as_deref())
    .bind(update.support_phone.as_deref())
    .bind(&defaults.platform_name)
    .bind(&defaults.contact_email)
    .bind(&defaults.support_phone)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row.into_model())
}
