use chrono::NaiveDateTime;

#[derive(Queryable, Debug)]
pub struct PostedEntry {
    pub id: i32,
    pub entry_guid: String,
    pub title: String,
    pub link: String,
    pub posted_at: NaiveDateTime,
}
