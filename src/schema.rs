table! {
    guild_configs (guild_id) {
        guild_id -> BigInt,
        news_channel_id -> Nullable<BigInt>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    posted_rss_entries (id) {
        id -> Integer,
        entry_guid -> Text,
        title -> Text,
        link -> Text,
        posted_at -> Timestamp,
    }
}

allow_tables_to_appear_in_same_query!(guild_configs, posted_rss_entries);
