//! Threaded comment views built from the flat list a `CommentsProvider`
//! returns.
//!
//! Only comments reachable from a root are shown. Replies whose parent is
//! missing are dropped, matching what the panel has always rendered.

use std::collections::{HashMap, HashSet};

use reel_model::{Comment, CommentId, EntryId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordering of top-level comments. Replies are always chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentSort {
    #[default]
    Newest,
    Oldest,
    Popular,
}

impl CommentSort {
    pub const ALL: [CommentSort; 3] =
        [CommentSort::Newest, CommentSort::Oldest, CommentSort::Popular];

    pub fn label(self) -> &'static str {
        match self {
            CommentSort::Newest => "Newest",
            CommentSort::Oldest => "Oldest",
            CommentSort::Popular => "Popular",
        }
    }
}

impl std::str::FromStr for CommentSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommentSort::ALL
            .into_iter()
            .find(|sort| sort.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown comment sort: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    /// This node plus all nested replies.
    pub fn count(&self) -> usize {
        1 + self.replies.iter().map(CommentNode::count).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    pub entry_id: EntryId,
    pub sort: CommentSort,
    pub roots: Vec<CommentNode>,
}

impl CommentThread {
    pub fn build(
        entry_id: EntryId,
        comments: Vec<Comment>,
        sort: CommentSort,
    ) -> Self {
        let mut kept = 0usize;
        let mut roots = Vec::new();
        let mut children: HashMap<CommentId, Vec<Comment>> = HashMap::new();

        for comment in comments {
            if comment.entry_id != entry_id {
                continue;
            }
            kept += 1;
            match comment.parent_id.clone() {
                None => roots.push(comment),
                Some(parent) => children.entry(parent).or_default().push(comment),
            }
        }

        sort_comments(&mut roots, sort);
        for replies in children.values_mut() {
            sort_comments(replies, CommentSort::Oldest);
        }

        let mut visited = HashSet::new();
        let roots: Vec<CommentNode> = roots
            .into_iter()
            .filter_map(|root| attach_replies(root, &mut children, &mut visited))
            .collect();

        let dropped = kept - roots.iter().map(CommentNode::count).sum::<usize>();
        if dropped > 0 {
            debug!(%entry_id, dropped, "comments not reachable from a root");
        }

        Self {
            entry_id,
            sort,
            roots,
        }
    }

    /// Number of comments shown, replies included.
    pub fn len(&self) -> usize {
        self.roots.iter().map(CommentNode::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Rebuild with a different top-level order.
    pub fn resorted(mut self, sort: CommentSort) -> Self {
        sort_nodes(&mut self.roots, sort);
        self.sort = sort;
        self
    }
}

fn attach_replies(
    comment: Comment,
    children: &mut HashMap<CommentId, Vec<Comment>>,
    visited: &mut HashSet<CommentId>,
) -> Option<CommentNode> {
    if !visited.insert(comment.id.clone()) {
        return None;
    }
    let replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|reply| attach_replies(reply, children, visited))
        .collect();
    Some(CommentNode { comment, replies })
}

fn sort_comments(comments: &mut [Comment], sort: CommentSort) {
    match sort {
        CommentSort::Newest => {
            comments.sort_by(|a, b| b.created_at.cmp(&a.created_at))
        }
        CommentSort::Oldest => {
            comments.sort_by(|a, b| a.created_at.cmp(&b.created_at))
        }
        CommentSort::Popular => comments.sort_by(|a, b| {
            b.score()
                .cmp(&a.score())
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
    }
}

fn sort_nodes(nodes: &mut [CommentNode], sort: CommentSort) {
    match sort {
        CommentSort::Newest => nodes
            .sort_by(|a, b| b.comment.created_at.cmp(&a.comment.created_at)),
        CommentSort::Oldest => nodes
            .sort_by(|a, b| a.comment.created_at.cmp(&b.comment.created_at)),
        CommentSort::Popular => nodes.sort_by(|a, b| {
            b.comment
                .score()
                .cmp(&a.comment.score())
                .then_with(|| b.comment.created_at.cmp(&a.comment.created_at))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use reel_model::UploaderId;

    fn comment(
        id: &str,
        parent: Option<&str>,
        minutes: i64,
        votes: (u32, u32),
    ) -> Comment {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Comment {
            id: CommentId::new(id).unwrap(),
            entry_id: EntryId::new("short_1").unwrap(),
            author_id: UploaderId::new("user_2").unwrap(),
            text: format!("text {id}"),
            parent_id: parent.map(|p| CommentId::new(p).unwrap()),
            upvotes: votes.0,
            downvotes: votes.1,
            created_at: base + Duration::minutes(minutes),
        }
    }

    fn root_ids(thread: &CommentThread) -> Vec<&str> {
        thread.roots.iter().map(|n| n.comment.id.as_str()).collect()
    }

    fn fixture() -> Vec<Comment> {
        vec![
            comment("c1", None, 0, (5, 0)),
            comment("c2", None, 10, (1, 4)),
            comment("c3", None, 5, (20, 2)),
            comment("r1", Some("c1"), 3, (0, 0)),
            comment("r2", Some("c1"), 1, (0, 0)),
            comment("rr1", Some("r1"), 4, (0, 0)),
        ]
    }

    #[test]
    fn nests_replies_chronologically() {
        let thread = CommentThread::build(
            EntryId::new("short_1").unwrap(),
            fixture(),
            CommentSort::Oldest,
        );
        assert_eq!(root_ids(&thread), vec!["c1", "c3", "c2"]);

        let c1 = &thread.roots[0];
        let reply_ids: Vec<_> =
            c1.replies.iter().map(|n| n.comment.id.as_str()).collect();
        assert_eq!(reply_ids, vec!["r2", "r1"]);
        assert_eq!(c1.replies[1].replies[0].comment.id.as_str(), "rr1");
        assert_eq!(thread.len(), 6);
    }

    #[test]
    fn sort_orders() {
        let id = EntryId::new("short_1").unwrap();
        let newest = CommentThread::build(id.clone(), fixture(), CommentSort::Newest);
        assert_eq!(root_ids(&newest), vec!["c2", "c3", "c1"]);

        let popular = newest.resorted(CommentSort::Popular);
        assert_eq!(root_ids(&popular), vec!["c3", "c1", "c2"]);
        assert_eq!(popular.sort, CommentSort::Popular);
    }

    #[test]
    fn orphans_and_foreign_comments_are_dropped() {
        let mut comments = fixture();
        comments.push(comment("orphan", Some("gone"), 2, (0, 0)));
        let mut foreign = comment("other", None, 2, (0, 0));
        foreign.entry_id = EntryId::new("short_2").unwrap();
        comments.push(foreign);

        let thread = CommentThread::build(
            EntryId::new("short_1").unwrap(),
            comments,
            CommentSort::Newest,
        );
        assert_eq!(thread.len(), 6);
    }

    #[test]
    fn self_parented_comment_does_not_loop() {
        let comments = vec![comment("loop", Some("loop"), 0, (0, 0))];
        let thread = CommentThread::build(
            EntryId::new("short_1").unwrap(),
            comments,
            CommentSort::Newest,
        );
        assert!(thread.is_empty());
    }

    #[test]
    fn parses_sort_names() {
        assert_eq!("Popular".parse::<CommentSort>(), Ok(CommentSort::Popular));
        assert!("random".parse::<CommentSort>().is_err());
        for sort in CommentSort::ALL {
            assert_eq!(sort.label().to_lowercase().parse::<CommentSort>(), Ok(sort));
        }
    }
}
