use crate::search::request_tracker::CancelToken;
use leptos::prelude::*;
use snipshare_api_types::{Snippet, SnippetId};
use std::collections::HashMap;

/// Identifies one rendered card. The same snippet can show up in several
/// lists on a page, each with its own card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CardKey {
    pub list: &'static str,
    pub id: SnippetId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LikeState {
    pub count: i64,
    pub liked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    pub fn method(self) -> &'static str {
        match self {
            LikeAction::Like => "POST",
            LikeAction::Unlike => "DELETE",
        }
    }
}

/// Like counts keyed by snippet, so every card of a snippet shows the same
/// number after an optimistic update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LikeLedger {
    states: HashMap<SnippetId, LikeState>,
}

impl LikeLedger {
    /// Records the server's numbers unless the snippet is already known, in
    /// which case local updates win.
    pub fn register(&mut self, snippet: &Snippet) {
        self.states.entry(snippet.id).or_insert(LikeState {
            count: snippet.likes,
            liked: snippet.is_liked,
        });
    }

    pub fn state(&self, id: SnippetId) -> LikeState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    pub fn toggle(&mut self, id: SnippetId) -> LikeAction {
        let state = self.states.entry(id).or_default();
        if state.liked {
            state.liked = false;
            state.count -= 1;
            LikeAction::Unlike
        } else {
            state.liked = true;
            state.count += 1;
            LikeAction::Like
        }
    }
}

/// Which card, if any, is expanded. At most one is open at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpandedCard(Option<CardKey>);

impl ExpandedCard {
    pub fn is_expanded(&self, key: CardKey) -> bool {
        self.0 == Some(key)
    }

    /// Opens `key`, collapsing whatever was open, or closes it if it already
    /// was the open card.
    pub fn toggle(&mut self, key: CardKey) {
        self.0 = if self.is_expanded(key) { None } else { Some(key) };
    }
}

/// Page wide card state shared by every snippet card.
#[derive(Clone, Copy)]
pub struct CardBoard {
    pub expanded: RwSignal<ExpandedCard>,
    pub likes: RwSignal<LikeLedger>,
    likes_in_flight: StoredValue<HashMap<SnippetId, CancelToken>>,
}

impl CardBoard {
    pub fn new() -> Self {
        Self {
            expanded: RwSignal::new(ExpandedCard::default()),
            likes: RwSignal::new(LikeLedger::default()),
            likes_in_flight: StoredValue::new(HashMap::new()),
        }
    }

    /// Flips the like state of `id` on every card and hands back the request
    /// to send, cancelling the previous one for the same snippet.
    pub fn toggle_like(&self, id: SnippetId) -> (LikeAction, CancelToken) {
        let mut action = LikeAction::Like;
        self.likes.update(|ledger| action = ledger.toggle(id));
        let token = CancelToken::new();
        let previous = self
            .likes_in_flight
            .try_update_value(|in_flight| in_flight.insert(id, token.clone()))
            .flatten();
        if let Some(previous) = previous {
            previous.cancel();
        }
        (action, token)
    }

    pub fn register(&self, snippet: &Snippet) {
        let known = self
            .likes
            .with_untracked(|ledger| ledger.states.contains_key(&snippet.id));
        if !known {
            self.likes.update(|ledger| ledger.register(snippet));
        }
    }
}

pub fn provide_card_board() -> CardBoard {
    if let Some(existing) = use_context::<CardBoard>() {
        return existing;
    }
    let board = CardBoard::new();
    provide_context(board);
    board
}

pub fn use_card_board() -> CardBoard {
    use_context::<CardBoard>().unwrap_or_else(provide_card_board)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(id: SnippetId, likes: i64, is_liked: bool) -> Snippet {
        Snippet {
            id,
            likes,
            is_liked,
            ..Default::default()
        }
    }

    #[test]
    fn liking_twice_restores_the_original_state() {
        let mut ledger = LikeLedger::default();
        ledger.register(&snippet(7, 4, false));
        assert_eq!(ledger.toggle(7), LikeAction::Like);
        assert_eq!(ledger.state(7), LikeState { count: 5, liked: true });
        assert_eq!(ledger.toggle(7), LikeAction::Unlike);
        assert_eq!(ledger.state(7), LikeState { count: 4, liked: false });
    }

    #[test]
    fn already_liked_snippet_unlikes_first() {
        let mut ledger = LikeLedger::default();
        ledger.register(&snippet(1, 3, true));
        assert_eq!(ledger.toggle(1).method(), "DELETE");
        assert_eq!(ledger.state(1).count, 2);
    }

    #[test]
    fn cards_of_the_same_snippet_share_likes() {
        let mut ledger = LikeLedger::default();
        ledger.register(&snippet(2, 0, false));
        ledger.toggle(2);
        // a second card for the same snippet arrives with stale server numbers
        ledger.register(&snippet(2, 0, false));
        assert_eq!(ledger.state(2), LikeState { count: 1, liked: true });
    }

    #[test]
    fn only_one_card_is_expanded() {
        let first = CardKey { list: "snippets", id: 1 };
        let second = CardKey { list: "similar", id: 1 };
        let mut expanded = ExpandedCard::default();
        expanded.toggle(first);
        assert!(expanded.is_expanded(first));
        expanded.toggle(second);
        assert!(!expanded.is_expanded(first));
        assert!(expanded.is_expanded(second));
        expanded.toggle(second);
        assert_eq!(expanded, ExpandedCard::default());
    }
}
