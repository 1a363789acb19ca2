use super::models::EventDraft;

/// The event modal: closed, creating a new event, or editing an existing one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    Create(EventDraft),
    Edit(EventDraft),
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        !matches!(self, EditorState::Closed)
    }

    pub fn draft(&self) -> Option<&EventDraft> {
        match self {
            EditorState::Closed => None,
            EditorState::Create(draft) | EditorState::Edit(draft) => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut EventDraft> {
        match self {
            EditorState::Closed => None,
            EditorState::Create(draft) | EditorState::Edit(draft) => Some(draft),
        }
    }

    /// Short name for logs
    pub fn mode(&self) -> &'static str {
        match self {
            EditorState::Closed => "closed",
            EditorState::Create(_) => "create",
            EditorState::Edit(_) => "edit",
        }
    }
}
