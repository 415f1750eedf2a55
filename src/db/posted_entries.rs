use crate::db;
use crate::models::PostedEntry;
use crate::schema::posted_rss_entries;
use chrono::NaiveDateTime;
use diesel::dsl::exists;
use diesel::result::Error;
use diesel::select;
use diesel::sqlite::SqliteConnection;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(Insertable)]
#[diesel(table_name = posted_rss_entries)]
pub struct NewPostedEntry<'a> {
    pub entry_guid: &'a str,
    pub title: &'a str,
    pub link: &'a str,
    pub posted_at: NaiveDateTime,
}

pub fn is_posted(conn: &mut SqliteConnection, entry_guid: &str) -> Result<bool, Error> {
    select(exists(
        posted_rss_entries::table.filter(posted_rss_entries::entry_guid.eq(entry_guid)),
    ))
    .get_result(conn)
}

/// Records an entry as delivered. Inserting a guid that already exists is a
/// no-op, which keeps concurrent watchers safe without application locking.
pub fn mark_posted(
    conn: &mut SqliteConnection,
    entry_guid: &str,
    title: &str,
    link: &str,
) -> Result<usize, Error> {
    let new_entry = NewPostedEntry {
        entry_guid,
        title,
        link,
        posted_at: db::current_time(),
    };

    diesel::insert_into(posted_rss_entries::table)
        .values(&new_entry)
        .on_conflict(posted_rss_entries::entry_guid)
        .do_nothing()
        .execute(conn)
}

pub fn find(conn: &mut SqliteConnection, entry_guid: &str) -> Option<PostedEntry> {
    match posted_rss_entries::table
        .filter(posted_rss_entries::entry_guid.eq(entry_guid))
        .first::<PostedEntry>(conn)
    {
        Ok(record) => Some(record),
        _ => None,
    }
}

pub fn count(conn: &mut SqliteConnection) -> Result<i64, Error> {
    posted_rss_entries::table.count().get_result(conn)
}

#[cfg(test)]
mod tests {
    use crate::db;

    #[test]
    fn it_reports_an_entry_only_after_it_was_marked() {
        let mut connection = db::establish_in_memory_connection();

        assert!(!super::is_posted(&mut connection, "cb_news_1").unwrap());

        super::mark_posted(&mut connection, "cb_news_1", "Titel", "https://example.com/1").unwrap();

        assert!(super::is_posted(&mut connection, "cb_news_1").unwrap());
    }

    #[test]
    fn it_ignores_a_duplicate_mark() {
        let mut connection = db::establish_in_memory_connection();

        let first =
            super::mark_posted(&mut connection, "cb_news_2", "Titel", "https://example.com/2")
                .unwrap();
        let second =
            super::mark_posted(&mut connection, "cb_news_2", "Anderer", "https://example.com/x")
                .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 0);
        assert_eq!(super::count(&mut connection).unwrap(), 1);

        let record = super::find(&mut connection, "cb_news_2").unwrap();
        assert_eq!(record.title, "Titel");
        assert_eq!(record.link, "https://example.com/2");
    }

    #[test]
    fn it_keeps_entries_from_different_sources_apart() {
        let mut connection = db::establish_in_memory_connection();

        super::mark_posted(&mut connection, "cb_news_123", "CB", "https://example.com/cb")
            .unwrap();

        assert!(!super::is_posted(&mut connection, "pcgh_123").unwrap());

        super::mark_posted(&mut connection, "pcgh_123", "PCGH", "https://example.com/pcgh")
            .unwrap();

        assert_eq!(super::count(&mut connection).unwrap(), 2);
    }
}
