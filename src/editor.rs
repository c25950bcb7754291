//! Session state for the sortable chapter/topic lists: the edit cursor and
//! the expanded chapters. Persisted data is only ever changed through an
//! [`OutlineStore`].

use crate::outline::{normalize_name, OutlineError, Subject};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// The owning state container for subjects, chapters and topics.
pub trait OutlineStore {
    fn load_subject(&self, subject_id: &str) -> Result<Subject, OutlineError>;
    fn add_chapter(&mut self, subject_id: &str, name: &str) -> Result<String, OutlineError>;
    fn rename_chapter(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        name: &str,
    ) -> Result<(), OutlineError>;
    fn delete_chapter(&mut self, subject_id: &str, chapter_id: &str) -> Result<(), OutlineError>;
    /// Returns the order actually stored.
    fn reorder_chapters(
        &mut self,
        subject_id: &str,
        chapter_ids: &[String],
    ) -> Result<Vec<String>, OutlineError>;
    fn add_topic(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        text: &str,
    ) -> Result<String, OutlineError>;
    fn rename_topic(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        topic_id: &str,
        text: &str,
    ) -> Result<(), OutlineError>;
    fn delete_topic(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        topic_id: &str,
    ) -> Result<(), OutlineError>;
    fn reorder_topics(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        topic_ids: &[String],
    ) -> Result<Vec<String>, OutlineError>;

    /// Drop of chapter `active` onto chapter `over`, resolved against the current order.
    fn move_chapter(
        &mut self,
        subject_id: &str,
        active: &str,
        over: &str,
    ) -> Result<Vec<String>, OutlineError> {
        let mut chapters = self.load_subject(subject_id)?.chapters;
        if !chapters.move_item(active, over)? {
            return Ok(chapters.ids());
        }
        self.reorder_chapters(subject_id, &chapters.ids())
    }

    fn move_topic(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        active: &str,
        over: &str,
    ) -> Result<Vec<String>, OutlineError> {
        let mut topics = self.load_subject(subject_id)?.chapter(chapter_id)?.topics.clone();
        if !topics.move_item(active, over)? {
            return Ok(topics.ids());
        }
        self.reorder_topics(subject_id, chapter_id, &topics.ids())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditTarget {
    Chapter { chapter_id: String },
    Topic { chapter_id: String, topic_id: String },
}

impl EditTarget {
    pub fn chapter_id(&self) -> &str {
        match self {
            Self::Chapter { chapter_id } | Self::Topic { chapter_id, .. } => chapter_id,
        }
    }
}

/// The item in edit mode. A commit always goes to `subject_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCursor {
    pub subject_id: String,
    pub target: EditTarget,
    pub draft: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
    Other,
}

impl EditKey {
    pub fn parse(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyOutcome {
    Committed,
    Cancelled,
    Ignored,
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEditor {
    cursor: Option<EditCursor>,
    expanded: BTreeSet<String>,
}

impl OutlineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Option<&EditCursor> {
        self.cursor.as_ref()
    }

    pub fn is_editing(&self, target: &EditTarget) -> bool {
        self.cursor.as_ref().is_some_and(|c| &c.target == target)
    }

    pub fn is_expanded(&self, chapter_id: &str) -> bool {
        self.expanded.contains(chapter_id)
    }

    /// Puts one item in edit mode, replacing any other. The draft starts as the current text.
    pub fn begin_edit<S: OutlineStore>(
        &mut self,
        store: &S,
        subject_id: &str,
        target: EditTarget,
    ) -> Result<&EditCursor, OutlineError> {
        let subject = store.load_subject(subject_id)?;
        let draft = match &target {
            EditTarget::Chapter { chapter_id } => subject.chapter(chapter_id)?.name.clone(),
            EditTarget::Topic {
                chapter_id,
                topic_id,
            } => subject.topic(chapter_id, topic_id)?.text.clone(),
        };
        debug!(edit = ?target, "begin edit");
        let cursor = self.cursor.insert(EditCursor {
            subject_id: subject.id,
            target,
            draft,
        });
        Ok(&*cursor)
    }

    /// Returns false when nothing is being edited.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match self.cursor.as_mut() {
            Some(cursor) => {
                cursor.draft = text.into();
                true
            }
            None => false,
        }
    }

    pub fn handle_key<S: OutlineStore>(
        &mut self,
        store: &mut S,
        key: EditKey,
    ) -> Result<KeyOutcome, OutlineError> {
        if self.cursor.is_none() {
            return Ok(KeyOutcome::Ignored);
        }
        match key {
            EditKey::Enter => {
                self.commit_edit(store)?;
                Ok(KeyOutcome::Committed)
            }
            EditKey::Escape => {
                self.cancel_edit();
                Ok(KeyOutcome::Cancelled)
            }
            EditKey::Other => Ok(KeyOutcome::Ignored),
        }
    }

    /// Persists the draft and clears the cursor. The cursor stays put if the store refuses.
    pub fn commit_edit<S: OutlineStore>(
        &mut self,
        store: &mut S,
    ) -> Result<Option<EditCursor>, OutlineError> {
        let Some(cursor) = self.cursor.as_ref() else {
            return Ok(None);
        };
        let value = normalize_name(&cursor.draft)?;
        let subject_id = cursor.subject_id.as_str();
        match &cursor.target {
            EditTarget::Chapter { chapter_id } => {
                store.rename_chapter(subject_id, chapter_id, &value)?
            }
            EditTarget::Topic {
                chapter_id,
                topic_id,
            } => store.rename_topic(subject_id, chapter_id, topic_id, &value)?,
        }
        let committed = self
            .cursor
            .take()
            .map(|c| EditCursor { draft: value, ..c });
        debug!(?committed, "committed edit");
        Ok(committed)
    }

    pub fn cancel_edit(&mut self) -> Option<EditCursor> {
        self.cursor.take()
    }

    /// Returns the new expanded state. Only chapters of `subject_id` can be expanded.
    pub fn toggle_expand<S: OutlineStore>(
        &mut self,
        store: &S,
        subject_id: &str,
        chapter_id: &str,
    ) -> Result<bool, OutlineError> {
        store.load_subject(subject_id)?.chapter(chapter_id)?;
        if self.expanded.remove(chapter_id) {
            return Ok(false);
        }
        self.expanded.insert(chapter_id.to_string());
        Ok(true)
    }

    pub fn delete_chapter<S: OutlineStore>(
        &mut self,
        store: &mut S,
        subject_id: &str,
        chapter_id: &str,
    ) -> Result<(), OutlineError> {
        store.delete_chapter(subject_id, chapter_id)?;
        self.forget_chapters(&[chapter_id.to_string()]);
        Ok(())
    }

    pub fn delete_topic<S: OutlineStore>(
        &mut self,
        store: &mut S,
        subject_id: &str,
        chapter_id: &str,
        topic_id: &str,
    ) -> Result<(), OutlineError> {
        store.delete_topic(subject_id, chapter_id, topic_id)?;
        let target = EditTarget::Topic {
            chapter_id: chapter_id.to_string(),
            topic_id: topic_id.to_string(),
        };
        if self.is_editing(&target) {
            self.cursor = None;
        }
        Ok(())
    }

    /// Clears the cursor and expanded state for chapters removed outside the editor.
    pub fn forget_chapters(&mut self, chapter_ids: &[String]) {
        if self
            .cursor
            .as_ref()
            .is_some_and(|c| chapter_ids.iter().any(|id| id == c.target.chapter_id()))
        {
            self.cursor = None;
        }
        for id in chapter_ids {
            self.expanded.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{new_id, Chapter, OrderedList, Topic};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        subjects: HashMap<String, Subject>,
    }

    impl MemoryStore {
        fn subject_mut(&mut self, subject_id: &str) -> Result<&mut Subject, OutlineError> {
            self.subjects
                .get_mut(subject_id)
                .ok_or_else(|| OutlineError::SubjectNotFound(subject_id.to_string()))
        }

        /// Edits a copy of the chapter and pushes it back over the original.
        fn update_chapter(
            &mut self,
            subject_id: &str,
            chapter_id: &str,
            edit: impl FnOnce(&mut Chapter) -> Result<(), OutlineError>,
        ) -> Result<(), OutlineError> {
            let subject = self.subject_mut(subject_id)?;
            let mut chapter = subject.chapter(chapter_id)?.clone();
            edit(&mut chapter)?;
            subject.chapters.push(chapter);
            Ok(())
        }
    }

    impl OutlineStore for MemoryStore {
        fn load_subject(&self, subject_id: &str) -> Result<Subject, OutlineError> {
            self.subjects
                .get(subject_id)
                .cloned()
                .ok_or_else(|| OutlineError::SubjectNotFound(subject_id.to_string()))
        }

        fn add_chapter(&mut self, subject_id: &str, name: &str) -> Result<String, OutlineError> {
            let id = new_id();
            self.subject_mut(subject_id)?.chapters.push(Chapter {
                id: id.clone(),
                name: normalize_name(name)?,
                topics: OrderedList::new(),
            });
            Ok(id)
        }

        fn rename_chapter(
            &mut self,
            subject_id: &str,
            chapter_id: &str,
            name: &str,
        ) -> Result<(), OutlineError> {
            let name = normalize_name(name)?;
            self.update_chapter(subject_id, chapter_id, |c| {
                c.name = name;
                Ok(())
            })
        }

        fn delete_chapter(&mut self, subject_id: &str, chapter_id: &str) -> Result<(), OutlineError> {
            self.subject_mut(subject_id)?
                .chapters
                .remove(chapter_id)
                .map(|_| ())
                .ok_or_else(|| OutlineError::ChapterNotFound(chapter_id.to_string()))
        }

        fn reorder_chapters(
            &mut self,
            subject_id: &str,
            chapter_ids: &[String],
        ) -> Result<Vec<String>, OutlineError> {
            let subject = self.subject_mut(subject_id)?;
            subject.chapters.reorder(chapter_ids)?;
            Ok(subject.chapters.ids())
        }

        fn add_topic(
            &mut self,
            subject_id: &str,
            chapter_id: &str,
            text: &str,
        ) -> Result<String, OutlineError> {
            let id = new_id();
            let topic = Topic {
                id: id.clone(),
                text: normalize_name(text)?,
            };
            self.update_chapter(subject_id, chapter_id, |c| {
                c.topics.push(topic);
                Ok(())
            })?;
            Ok(id)
        }

        fn rename_topic(
            &mut self,
            subject_id: &str,
            chapter_id: &str,
            topic_id: &str,
            text: &str,
        ) -> Result<(), OutlineError> {
            let text = normalize_name(text)?;
            self.update_chapter(subject_id, chapter_id, |c| {
                let mut topic = c
                    .topics
                    .get(topic_id)
                    .cloned()
                    .ok_or_else(|| OutlineError::TopicNotFound(topic_id.to_string()))?;
                topic.text = text;
                c.topics.push(topic);
                Ok(())
            })
        }

        fn delete_topic(
            &mut self,
            subject_id: &str,
            chapter_id: &str,
            topic_id: &str,
        ) -> Result<(), OutlineError> {
            self.update_chapter(subject_id, chapter_id, |c| {
                c.topics
                    .remove(topic_id)
                    .map(|_| ())
                    .ok_or_else(|| OutlineError::TopicNotFound(topic_id.to_string()))
            })
        }

        fn reorder_topics(
            &mut self,
            subject_id: &str,
            chapter_id: &str,
            topic_ids: &[String],
        ) -> Result<Vec<String>, OutlineError> {
            let mut order = Vec::new();
            self.update_chapter(subject_id, chapter_id, |c| {
                c.topics.reorder(topic_ids)?;
                order = c.topics.ids();
                Ok(())
            })?;
            Ok(order)
        }
    }

    struct Fixture {
        store: MemoryStore,
        chapters: Vec<String>,
        topics: Vec<String>,
    }

    /// Subject "s" with chapters A, B, C; chapter A holds topics t1, t2.
    fn fixture() -> Fixture {
        let mut store = MemoryStore::default();
        store
            .subjects
            .insert("s".to_string(), Subject::new("s", "Physics"));
        let chapters: Vec<String> = ["A", "B", "C"]
            .iter()
            .map(|n| store.add_chapter("s", n).expect("add chapter"))
            .collect();
        let topics: Vec<String> = ["t1", "t2"]
            .iter()
            .map(|t| store.add_topic("s", &chapters[0], t).expect("add topic"))
            .collect();
        Fixture {
            store,
            chapters,
            topics,
        }
    }

    fn chapter_target(id: &str) -> EditTarget {
        EditTarget::Chapter {
            chapter_id: id.to_string(),
        }
    }

    fn topic_target(chapter_id: &str, topic_id: &str) -> EditTarget {
        EditTarget::Topic {
            chapter_id: chapter_id.to_string(),
            topic_id: topic_id.to_string(),
        }
    }

    #[test]
    fn escape_leaves_every_chapter_name_unchanged() {
        let mut f = fixture();
        for chapter_id in f.chapters.clone() {
            let mut editor = OutlineEditor::new();
            let before = f.store.load_subject("s").expect("load");
            editor
                .begin_edit(&f.store, "s", chapter_target(&chapter_id))
                .expect("begin");
            editor.set_draft("scribble");
            let outcome = editor
                .handle_key(&mut f.store, EditKey::Escape)
                .expect("key");

            assert_eq!(outcome, KeyOutcome::Cancelled);
            assert!(editor.cursor().is_none());
            assert_eq!(f.store.load_subject("s").expect("load"), before);
        }
    }

    #[test]
    fn enter_commits_and_reread_returns_committed_value() {
        let mut f = fixture();
        let mut editor = OutlineEditor::new();
        let target = chapter_target(&f.chapters[0]);
        let cursor = editor.begin_edit(&f.store, "s", target.clone()).expect("begin");
        assert_eq!(cursor.draft, "A");

        editor.set_draft("  Kinematics ");
        let outcome = editor
            .handle_key(&mut f.store, EditKey::Enter)
            .expect("key");
        assert_eq!(outcome, KeyOutcome::Committed);
        assert!(editor.cursor().is_none());

        let subject = f.store.load_subject("s").expect("load");
        let chapter = subject.chapter(&f.chapters[0]).expect("chapter");
        assert_eq!(chapter.name, "Kinematics");
        // Renaming a chapter never disturbs its topics.
        assert_eq!(chapter.topics.ids(), f.topics);
    }

    #[test]
    fn empty_draft_is_rejected_and_cursor_kept() {
        let mut f = fixture();
        let mut editor = OutlineEditor::new();
        editor
            .begin_edit(&f.store, "s", chapter_target(&f.chapters[1]))
            .expect("begin");
        editor.set_draft("   ");
        assert_eq!(
            editor.commit_edit(&mut f.store),
            Err(OutlineError::EmptyName)
        );
        assert!(editor.is_editing(&chapter_target(&f.chapters[1])));
    }

    #[test]
    fn only_one_topic_is_editable_at_a_time() {
        let f = fixture();
        let mut editor = OutlineEditor::new();
        let first = topic_target(&f.chapters[0], &f.topics[0]);
        let second = topic_target(&f.chapters[0], &f.topics[1]);

        editor.begin_edit(&f.store, "s", first.clone()).expect("begin");
        assert!(editor.is_editing(&first));
        assert!(!editor.is_editing(&second));

        editor.begin_edit(&f.store, "s", second.clone()).expect("begin");
        assert!(!editor.is_editing(&first));
        assert!(editor.is_editing(&second));
        assert_eq!(editor.cursor().map(|c| c.draft.as_str()), Some("t2"));
    }

    #[test]
    fn topic_equality_needs_both_ids() {
        let f = fixture();
        let mut editor = OutlineEditor::new();
        editor
            .begin_edit(&f.store, "s", topic_target(&f.chapters[0], &f.topics[0]))
            .expect("begin");
        assert!(!editor.is_editing(&topic_target(&f.chapters[1], &f.topics[0])));
        assert!(!editor.is_editing(&chapter_target(&f.chapters[0])));
    }

    #[test]
    fn begin_edit_on_missing_item_fails_without_touching_cursor() {
        let f = fixture();
        let mut editor = OutlineEditor::new();
        editor
            .begin_edit(&f.store, "s", chapter_target(&f.chapters[0]))
            .expect("begin");
        let res = editor.begin_edit(&f.store, "s", topic_target(&f.chapters[1], "nope"));
        assert_eq!(res.err(), Some(OutlineError::TopicNotFound("nope".into())));
        assert!(editor.is_editing(&chapter_target(&f.chapters[0])));
    }

    #[test]
    fn delete_chapter_removes_one_and_clears_cursor_inside_it() {
        let mut f = fixture();
        let mut editor = OutlineEditor::new();
        editor
            .toggle_expand(&f.store, "s", &f.chapters[0])
            .expect("expand");
        editor
            .begin_edit(&f.store, "s", topic_target(&f.chapters[0], &f.topics[1]))
            .expect("begin");

        editor
            .delete_chapter(&mut f.store, "s", &f.chapters[0])
            .expect("delete");

        let subject = f.store.load_subject("s").expect("load");
        assert_eq!(subject.chapters.ids(), f.chapters[1..].to_vec());
        assert!(editor.cursor().is_none());
        assert!(!editor.is_expanded(&f.chapters[0]));
    }

    #[test]
    fn delete_other_chapter_keeps_cursor() {
        let mut f = fixture();
        let mut editor = OutlineEditor::new();
        editor
            .begin_edit(&f.store, "s", chapter_target(&f.chapters[2]))
            .expect("begin");
        editor
            .delete_chapter(&mut f.store, "s", &f.chapters[1])
            .expect("delete");
        assert!(editor.is_editing(&chapter_target(&f.chapters[2])));
        let subject = f.store.load_subject("s").expect("load");
        assert_eq!(
            subject.chapters.ids(),
            vec![f.chapters[0].clone(), f.chapters[2].clone()]
        );
    }

    #[test]
    fn delete_topic_clears_matching_cursor() {
        let mut f = fixture();
        let mut editor = OutlineEditor::new();
        editor
            .begin_edit(&f.store, "s", topic_target(&f.chapters[0], &f.topics[0]))
            .expect("begin");
        editor
            .delete_topic(&mut f.store, "s", &f.chapters[0], &f.topics[0])
            .expect("delete");
        assert!(editor.cursor().is_none());
        let subject = f.store.load_subject("s").expect("load");
        assert_eq!(
            subject.chapter(&f.chapters[0]).expect("chapter").topics.ids(),
            vec![f.topics[1].clone()]
        );
    }

    #[test]
    fn rename_after_move_hits_the_moved_chapter() {
        let mut f = fixture();
        let mut editor = OutlineEditor::new();
        editor
            .begin_edit(&f.store, "s", chapter_target(&f.chapters[0]))
            .expect("begin");
        let order = f
            .store
            .move_chapter("s", &f.chapters[0], &f.chapters[2])
            .expect("move");
        assert_eq!(
            order,
            vec![
                f.chapters[1].clone(),
                f.chapters[2].clone(),
                f.chapters[0].clone()
            ]
        );

        editor.set_draft("Moved");
        editor.commit_edit(&mut f.store).expect("commit");
        let subject = f.store.load_subject("s").expect("load");
        assert_eq!(subject.chapter(&f.chapters[0]).expect("chapter").name, "Moved");
        assert_eq!(subject.chapter(&f.chapters[2]).expect("chapter").name, "C");
    }

    #[test]
    fn move_topic_within_chapter() {
        let mut f = fixture();
        let order = f
            .store
            .move_topic("s", &f.chapters[0], &f.topics[1], &f.topics[0])
            .expect("move");
        assert_eq!(order, vec![f.topics[1].clone(), f.topics[0].clone()]);
    }

    #[test]
    fn move_onto_self_leaves_order_alone() {
        let mut f = fixture();
        let order = f
            .store
            .move_chapter("s", &f.chapters[1], &f.chapters[1])
            .expect("move");
        assert_eq!(order, f.chapters);
        assert_eq!(
            f.store.move_chapter("s", &f.chapters[1], "gone"),
            Err(OutlineError::UnknownId("gone".into()))
        );
    }

    #[test]
    fn commit_goes_to_the_subject_the_edit_began_in() {
        let mut f = fixture();
        f.store
            .subjects
            .insert("t".to_string(), Subject::new("t", "Chemistry"));
        let other = f.store.add_chapter("t", "Atoms").expect("add chapter");

        let mut editor = OutlineEditor::new();
        let cursor = editor
            .begin_edit(&f.store, "s", chapter_target(&f.chapters[1]))
            .expect("begin");
        assert_eq!(cursor.subject_id, "s");
        editor.set_draft("Optics");

        let committed = editor.commit_edit(&mut f.store).expect("commit");
        assert_eq!(committed.map(|c| c.subject_id), Some("s".to_string()));
        let subject = f.store.load_subject("s").expect("load");
        assert_eq!(subject.chapter(&f.chapters[1]).expect("chapter").name, "Optics");
        let untouched = f.store.load_subject("t").expect("load");
        assert_eq!(untouched.chapter(&other).expect("chapter").name, "Atoms");
    }

    #[test]
    fn toggle_expand_flips() {
        let f = fixture();
        let mut editor = OutlineEditor::new();
        let c = &f.chapters[2];
        assert_eq!(editor.toggle_expand(&f.store, "s", c), Ok(true));
        assert!(editor.is_expanded(c));
        assert_eq!(editor.toggle_expand(&f.store, "s", c), Ok(false));
        assert!(!editor.is_expanded(c));
    }

    #[test]
    fn toggle_expand_rejects_chapters_outside_the_subject() {
        let mut f = fixture();
        f.store
            .subjects
            .insert("t".to_string(), Subject::new("t", "Chemistry"));
        let other = f.store.add_chapter("t", "Atoms").expect("add chapter");
        let mut editor = OutlineEditor::new();

        assert_eq!(
            editor.toggle_expand(&f.store, "s", "never-existed"),
            Err(OutlineError::ChapterNotFound("never-existed".into()))
        );
        assert_eq!(
            editor.toggle_expand(&f.store, "s", &other),
            Err(OutlineError::ChapterNotFound(other.clone()))
        );
        assert_eq!(
            editor.toggle_expand(&f.store, "nope", &f.chapters[0]),
            Err(OutlineError::SubjectNotFound("nope".into()))
        );
        assert!(!editor.is_expanded("never-existed"));
        assert!(!editor.is_expanded(&other));
    }

    #[test]
    fn keys_without_cursor_are_ignored() {
        let mut f = fixture();
        let mut editor = OutlineEditor::new();
        assert_eq!(
            editor.handle_key(&mut f.store, EditKey::Enter),
            Ok(KeyOutcome::Ignored)
        );
        assert!(!editor.set_draft("x"));
    }

    #[test]
    fn forget_chapters_drops_cursor_and_expansion() {
        let f = fixture();
        let mut editor = OutlineEditor::new();
        for chapter_id in &f.chapters[1..] {
            editor.toggle_expand(&f.store, "s", chapter_id).expect("expand");
        }
        editor
            .begin_edit(&f.store, "s", chapter_target(&f.chapters[1]))
            .expect("begin");

        editor.forget_chapters(&[f.chapters[1].clone()]);
        assert!(editor.cursor().is_none());
        assert!(!editor.is_expanded(&f.chapters[1]));
        assert!(editor.is_expanded(&f.chapters[2]));
    }

    #[test]
    fn key_parsing() {
        assert_eq!(EditKey::parse("Enter"), EditKey::Enter);
        assert_eq!(EditKey::parse("Escape"), EditKey::Escape);
        assert_eq!(EditKey::parse("a"), EditKey::Other);
    }
}
