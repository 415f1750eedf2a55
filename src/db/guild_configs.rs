use crate::db;
use crate::models::GuildConfig;
use crate::schema::guild_configs;
use diesel::result::Error;
use diesel::sqlite::SqliteConnection;
use diesel::upsert::excluded;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(Insertable, Clone, Copy)]
#[diesel(table_name = guild_configs)]
pub struct NewGuildConfig {
    pub guild_id: i64,
    pub news_channel_id: Option<i64>,
}

/// Registers or clears the news destination for a guild. The news pipeline
/// only reads this table; writes come from the admin-facing configuration
/// surface.
pub fn set_news_channel(
    conn: &mut SqliteConnection,
    guild_id: i64,
    news_channel_id: Option<i64>,
) -> Result<GuildConfig, Error> {
    let new_config = NewGuildConfig {
        guild_id,
        news_channel_id,
    };

    diesel::insert_into(guild_configs::table)
        .values(new_config)
        .on_conflict(guild_configs::guild_id)
        .do_update()
        .set((
            guild_configs::news_channel_id.eq(excluded(guild_configs::news_channel_id)),
            guild_configs::updated_at.eq(db::current_time()),
        ))
        .execute(conn)?;

    find(conn, guild_id).ok_or(Error::NotFound)
}

pub fn find(conn: &mut SqliteConnection, guild_id: i64) -> Option<GuildConfig> {
    match guild_configs::table
        .filter(guild_configs::guild_id.eq(guild_id))
        .first::<GuildConfig>(conn)
    {
        Ok(record) => Some(record),
        _ => None,
    }
}

/// All destination channels registered for news delivery, one per guild.
pub fn news_channels(conn: &mut SqliteConnection) -> Result<Vec<i64>, Error> {
    let ids = guild_configs::table
        .filter(guild_configs::news_channel_id.is_not_null())
        .select(guild_configs::news_channel_id)
        .load::<Option<i64>>(conn)?;

    Ok(ids.into_iter().flatten().collect())
}
