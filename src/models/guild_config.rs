use crate::schema::guild_configs;
use chrono::NaiveDateTime;

#[derive(Queryable, Identifiable, Debug)]
#[diesel(table_name = guild_configs)]
#[diesel(primary_key(guild_id))]
pub struct GuildConfig {
    pub guild_id: i64,
    pub news_channel_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
