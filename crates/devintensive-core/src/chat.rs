//! Chat list: projection of chats into list rows, archive grouping and search.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    humanize::short_format,
    text::{parse_full_name, to_initials, truncate},
    Result,
};

/// Id of the synthetic row that stands in for all archived chats.
pub const ARCHIVE_ITEM_ID: &str = "-1";
pub const ARCHIVE_ITEM_TITLE: &str = "Архив чатов";

const SHORT_DESCRIPTION_LENGTH: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Single,
    Group,
    Archive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub author: String,
    pub text: String,
    pub date: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub chat_type: ChatType,
    pub messages: Vec<Message>,
    pub is_archived: bool,
    pub is_online: bool,
}

/// One row of the chat list as the UI shows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatItem {
    pub id: String,
    pub title: String,
    pub initials: Option<String>,
    pub short_description: Option<String>,
    pub message_count: usize,
    pub last_message_date: Option<String>,
    pub is_online: bool,
    pub chat_type: ChatType,
    pub author: Option<String>,
}

impl Chat {
    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_read).count()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.iter().max_by_key(|m| m.date)
    }

    pub fn to_chat_item(&self, now: &DateTime<Utc>) -> ChatItem {
        let last = self.last_message();
        let (first, last_name) = parse_full_name(Some(&self.title));
        ChatItem {
            id: self.id.clone(),
            title: self.title.clone(),
            initials: to_initials(first.as_deref(), last_name.as_deref()),
            short_description: last.map(|m| truncate(&m.text, SHORT_DESCRIPTION_LENGTH)),
            message_count: self.unread_count(),
            last_message_date: last.map(|m| short_format(&m.date, now)),
            is_online: self.is_online,
            chat_type: self.chat_type,
            author: match self.chat_type {
                ChatType::Single => None,
                _ => last.map(|m| m.author.clone()),
            },
        }
    }

    /// Summary row for the archived chats, showing the most recent message
    /// among them.
    pub fn to_archive_item(archived: &[Chat], now: &DateTime<Utc>) -> ChatItem {
        let last = archived
            .iter()
            .filter_map(Chat::last_message)
            .max_by_key(|m| m.date);
        ChatItem {
            id: ARCHIVE_ITEM_ID.to_string(),
            title: ARCHIVE_ITEM_TITLE.to_string(),
            initials: None,
            short_description: last.map(|m| truncate(&m.text, SHORT_DESCRIPTION_LENGTH)),
            message_count: archived.iter().map(Chat::unread_count).sum(),
            last_message_date: last.map(|m| short_format(&m.date, now)),
            is_online: false,
            chat_type: ChatType::Archive,
            author: last.map(|m| m.author.clone()),
        }
    }
}

/// Port for wherever chats are stored.
pub trait ChatRepository {
    fn load_chats(&self) -> Result<Vec<Chat>>;
    fn find(&self, id: &str) -> Result<Option<Chat>>;
    fn update(&mut self, chat: Chat) -> Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryChatRepository {
    chats: Vec<Chat>,
}

impl InMemoryChatRepository {
    pub fn new(chats: Vec<Chat>) -> Self {
        Self { chats }
    }
}

impl ChatRepository for InMemoryChatRepository {
    fn load_chats(&self) -> Result<Vec<Chat>> {
        Ok(self.chats.clone())
    }

    fn find(&self, id: &str) -> Result<Option<Chat>> {
        Ok(self.chats.iter().find(|c| c.id == id).cloned())
    }

    fn update(&mut self, chat: Chat) -> Result<()> {
        match self.chats.iter_mut().find(|c| c.id == chat.id) {
            Some(slot) => *slot = chat,
            None => self.chats.push(chat),
        }
        Ok(())
    }
}

/// Numeric ids sort numerically and ahead of anything non-numeric.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// State behind the main chat list screen.
pub struct ChatListModel<R: ChatRepository> {
    repository: R,
    query: String,
}

impl<R: ChatRepository> ChatListModel<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            query: String::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn handle_search_query(&mut self, text: Option<&str>) {
        self.query = text.unwrap_or_default().to_string();
    }

    /// Rows to display: the archive summary first (if anything is archived),
    /// then the remaining chats by id, filtered by the search query.
    pub fn items(&self, now: &DateTime<Utc>) -> Result<Vec<ChatItem>> {
        let (archived, mut active): (Vec<Chat>, Vec<Chat>) = self
            .repository
            .load_chats()?
            .into_iter()
            .partition(|c| c.is_archived);
        active.sort_by(|a, b| compare_ids(&a.id, &b.id));

        let mut items = Vec::with_capacity(active.len() + 1);
        if !archived.is_empty() {
            items.push(Chat::to_archive_item(&archived, now));
        }
        items.extend(active.iter().map(|c| c.to_chat_item(now)));

        if self.query.is_empty() {
            return Ok(items);
        }
        let needle = self.query.to_lowercase();
        Ok(items
            .into_iter()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .collect())
    }

    /// Returns false when no chat has this id.
    pub fn add_to_archive(&mut self, chat_id: &str) -> Result<bool> {
        self.set_archived(chat_id, true)
    }

    pub fn restore_from_archive(&mut self, chat_id: &str) -> Result<bool> {
        self.set_archived(chat_id, false)
    }

    fn set_archived(&mut self, chat_id: &str, is_archived: bool) -> Result<bool> {
        let Some(chat) = self.repository.find(chat_id)? else {
            tracing::debug!(chat_id, "archive toggle for unknown chat ignored");
            return Ok(false);
        };
        tracing::debug!(chat_id, is_archived, "chat archive flag changed");
        self.repository.update(Chat {
            is_archived,
            ..chat
        })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 7, 1, 12, 0, 0).unwrap()
    }

    fn message(author: &str, text: &str, minutes_ago: i64, is_read: bool) -> Message {
        Message {
            author: author.to_string(),
            text: text.to_string(),
            date: now() - TimeDelta::minutes(minutes_ago),
            is_read,
        }
    }

    fn chat(id: &str, title: &str, chat_type: ChatType, messages: Vec<Message>) -> Chat {
        Chat {
            id: id.to_string(),
            title: title.to_string(),
            chat_type,
            messages,
            is_archived: false,
            is_online: false,
        }
    }

    fn model() -> ChatListModel<InMemoryChatRepository> {
        ChatListModel::new(InMemoryChatRepository::new(vec![
            chat(
                "10",
                "Планета Экспресс",
                ChatType::Group,
                vec![
                    message("Фрай", "Кто-нибудь видел мою банку?", 30, true),
                    message("Лила", "Вылет через час, всем собраться в ангаре", 5, false),
                ],
            ),
            chat(
                "2",
                "Bender Rodriguez",
                ChatType::Single,
                vec![message("Bender", "Поцелуй мой блестящий зад", 24 * 60, false)],
            ),
            chat("3", "Zoidberg", ChatType::Single, vec![]),
        ]))
    }

    #[test]
    fn items_without_archive_are_sorted_by_numeric_id() {
        let items = model().items(&now()).unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "10"]);
    }

    #[test]
    fn chat_item_projection() {
        let items = model().items(&now()).unwrap();

        let single = &items[0];
        assert_eq!(single.initials.as_deref(), Some("BR"));
        assert_eq!(single.message_count, 1);
        assert_eq!(single.last_message_date.as_deref(), Some("30.06.19"));
        assert_eq!(single.author, None);

        let group = &items[2];
        assert_eq!(group.chat_type, ChatType::Group);
        assert_eq!(group.author.as_deref(), Some("Лила"));
        assert_eq!(
            group.short_description.as_deref(),
            Some("Вылет через час, всем собраться...")
        );
        assert_eq!(group.last_message_date.as_deref(), Some("11:55"));

        let empty = &items[1];
        assert_eq!(empty.short_description, None);
        assert_eq!(empty.last_message_date, None);
        assert_eq!(empty.initials.as_deref(), Some("Z"));
    }

    #[test]
    fn archived_chats_collapse_into_first_row() {
        let mut m = model();
        assert!(m.add_to_archive("10").unwrap());
        assert!(m.add_to_archive("2").unwrap());

        let items = m.items(&now()).unwrap();
        assert_eq!(items.len(), 2);
        let archive = &items[0];
        assert_eq!(archive.id, ARCHIVE_ITEM_ID);
        assert_eq!(archive.chat_type, ChatType::Archive);
        assert_eq!(archive.title, "Архив чатов");
        assert_eq!(archive.message_count, 2);
        assert_eq!(archive.author.as_deref(), Some("Лила"));
        assert_eq!(items[1].id, "3");
    }

    #[test]
    fn restore_brings_chat_back() {
        let mut m = model();
        m.add_to_archive("3").unwrap();
        assert!(m.restore_from_archive("3").unwrap());
        let items = m.items(&now()).unwrap();
        assert!(items.iter().all(|i| i.chat_type != ChatType::Archive));
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut m = model();
        assert!(!m.add_to_archive("404").unwrap());
        assert!(!m.restore_from_archive("404").unwrap());
        assert_eq!(m.repository().load_chats().unwrap().len(), 3);
    }

    #[test]
    fn search_filters_titles_case_insensitively() {
        let mut m = model();
        m.handle_search_query(Some("ЭКСП"));
        let items = m.items(&now()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "10");

        m.handle_search_query(None);
        assert_eq!(m.query(), "");
        assert_eq!(m.items(&now()).unwrap().len(), 3);
    }

    #[test]
    fn search_also_matches_archive_row() {
        let mut m = model();
        m.add_to_archive("2").unwrap();
        m.handle_search_query(Some("архив"));
        let items = m.items(&now()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ARCHIVE_ITEM_ID);
    }

    #[test]
    fn non_numeric_ids_sort_after_numeric() {
        assert_eq!(compare_ids("9", "10"), Ordering::Less);
        assert_eq!(compare_ids("abc", "1"), Ordering::Greater);
        assert_eq!(compare_ids("a", "b"), Ordering::Less);
    }
}
