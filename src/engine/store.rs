//! Authoritative logical contents of every container.
//!
//! Lists keep insertion order and are only ever edited by id. A token lives
//! in at most one list; while a transfer is animating it sits in the
//! in-flight slot instead and belongs to no list at all.

use std::sync::Arc;

use crate::engine::renderer::Renderer;
use crate::error::{EngineError, Result};
use crate::model::{ContainerKind, Token};

/// A token as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub token: Token,
    /// Finished call-stack frame awaiting removal
    pub completed: bool,
}

/// Per-container token ids, in [`ContainerKind::ALL`] order.
pub type Snapshot = Vec<(ContainerKind, Vec<String>)>;

pub struct ContainerStore {
    lists: [Vec<Entry>; 5],
    in_flight: Option<(ContainerKind, Token)>,
    renderer: Arc<dyn Renderer>,
}

impl ContainerStore {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            lists: Default::default(),
            in_flight: None,
            renderer,
        }
    }

    /// Empty every container.
    pub fn reset(&mut self) {
        for list in &mut self.lists {
            list.clear();
        }
        self.in_flight = None;
        self.renderer.clear();
    }

    /// Append one heap token per label.
    pub fn seed_heap<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<()> {
        for label in labels {
            self.append(ContainerKind::Heap, Token::heap(label.as_ref()))?;
        }
        Ok(())
    }

    /// Insert at the end of `kind`. Ids are unique across all containers.
    pub fn append(&mut self, kind: ContainerKind, token: Token) -> Result<()> {
        if let Some(holder) = self.holder_of(&token.id) {
            return Err(EngineError::DuplicateToken {
                id: token.id,
                container: holder,
            });
        }
        self.renderer.create_token(kind, &token);
        self.lists[kind.index()].push(Entry {
            token,
            completed: false,
        });
        Ok(())
    }

    pub fn remove_by_id(&mut self, kind: ContainerKind, id: &str) -> Result<Token> {
        let pos = self.position(kind, id)?;
        let entry = self.lists[kind.index()].remove(pos);
        self.renderer.remove_token(kind, id);
        Ok(entry.token)
    }

    /// Flag a token as finished while keeping it in the list.
    pub fn mark_completed(&mut self, kind: ContainerKind, id: &str) -> Result<()> {
        let pos = self.position(kind, id)?;
        self.lists[kind.index()][pos].completed = true;
        self.renderer.mark_completed(kind, id);
        Ok(())
    }

    /// Take a token out of `kind` for the duration of a transfer.
    ///
    /// The visual is left in place; the renderer hides it while animating.
    pub fn detach(&mut self, kind: ContainerKind, id: &str) -> Result<Token> {
        debug_assert!(self.in_flight.is_none(), "transfers never overlap");
        let pos = self.position(kind, id)?;
        let entry = self.lists[kind.index()].remove(pos);
        self.in_flight = Some((kind, entry.token.clone()));
        Ok(entry.token)
    }

    /// Finish a transfer: the in-flight token with `id` lands in `destination`.
    pub fn land(&mut self, id: &str, destination: ContainerKind) -> Result<()> {
        let (source, token) = match self.in_flight.take() {
            Some((source, token)) if token.id == id => (source, token),
            other => {
                self.in_flight = other;
                return Err(EngineError::TokenNotFound {
                    id: id.to_string(),
                    container: destination,
                });
            }
        };
        self.renderer.remove_token(source, id);
        self.append(destination, token)
    }

    pub fn entries(&self, kind: ContainerKind) -> &[Entry] {
        &self.lists[kind.index()]
    }

    pub fn tokens(&self, kind: ContainerKind) -> Vec<Token> {
        self.entries(kind).iter().map(|e| e.token.clone()).collect()
    }

    pub fn is_empty(&self, kind: ContainerKind) -> bool {
        self.lists[kind.index()].is_empty()
    }

    /// Which container currently holds `id`, ignoring the in-flight slot.
    pub fn locate(&self, id: &str) -> Option<ContainerKind> {
        ContainerKind::ALL
            .into_iter()
            .find(|kind| self.lists[kind.index()].iter().any(|e| e.token.id == id))
    }

    pub fn in_flight(&self) -> Option<&Token> {
        self.in_flight.as_ref().map(|(_, token)| token)
    }

    pub fn snapshot(&self) -> Snapshot {
        ContainerKind::ALL
            .into_iter()
            .map(|kind| {
                let ids = self.lists[kind.index()]
                    .iter()
                    .map(|e| e.token.id.clone())
                    .collect();
                (kind, ids)
            })
            .collect()
    }

    fn holder_of(&self, id: &str) -> Option<ContainerKind> {
        match &self.in_flight {
            Some((source, token)) if token.id == id => Some(*source),
            _ => self.locate(id),
        }
    }

    fn position(&self, kind: ContainerKind, id: &str) -> Result<usize> {
        self.lists[kind.index()]
            .iter()
            .position(|e| e.token.id == id)
            .ok_or_else(|| EngineError::TokenNotFound {
                id: id.to_string(),
                container: kind,
            })
    }
}
