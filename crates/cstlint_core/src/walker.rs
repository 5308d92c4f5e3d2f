//! Dispatches tree events to registered checks.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use cstlint_ast::{NodeRef, TokenKind, Tree};
use tracing::{debug, trace};

use crate::check::{Check, CheckContext, CheckSettings};
use crate::error::LinterError;
use crate::file_text::FileText;
use crate::violation::Violation;

/// Decides whether a reported violation is kept.
pub trait ViolationFilter: Send + Sync {
    /// Returns false to drop the violation of `event`.
    fn accept(&self, event: &FilterEvent<'_>) -> bool;
}

/// A single violation together with the file it was reported in.
#[derive(Debug, Clone, Copy)]
pub struct FilterEvent<'e> {
    pub path: &'e Path,
    pub file: &'e FileText<'e>,
    pub violation: &'e Violation,
}

struct RegisteredCheck<K: TokenKind> {
    check: Box<dyn Check<K>>,
    settings: CheckSettings,
    sequence: usize,
    tokens: BTreeSet<K>,
    violations: BTreeSet<Violation>,
}

impl<K: TokenKind> RegisteredCheck<K> {
    /// Name, then id with unset ids last, then registration order.
    fn order(&self, other: &Self) -> Ordering {
        let by_id = match (&self.settings.id, &other.settings.id) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        self.check
            .name()
            .cmp(other.check.name())
            .then(by_id)
            .then(self.sequence.cmp(&other.sequence))
    }
}

#[derive(Clone, Copy)]
enum Event {
    Visit,
    Leave,
}

/// Walks one tree per file and hands every node to the checks registered
/// for its kind.
pub struct Walker<K: TokenKind> {
    /// Registered checks, in dispatch order.
    checks: Vec<RegisteredCheck<K>>,
    /// Indices into `checks`, by token id.
    dispatch: Vec<Vec<usize>>,
    filters: Vec<Arc<dyn ViolationFilter>>,
    tab_width: usize,
    registered: usize,
}

impl<K: TokenKind> Walker<K> {
    pub fn new(tab_width: usize) -> Self {
        Self {
            checks: Vec::new(),
            dispatch: vec![Vec::new(); K::ALL.len() + 1],
            filters: Vec::new(),
            tab_width: tab_width.max(1),
            registered: 0,
        }
    }

    /// Registers `check` for the kinds its settings select.
    ///
    /// Without configured tokens the check listens to its default tokens.
    /// Otherwise it listens to its required tokens plus the configured ones,
    /// each of which must be acceptable to the check.
    pub fn register(
        &mut self,
        mut check: Box<dyn Check<K>>,
        settings: CheckSettings,
    ) -> Result<(), LinterError> {
        let mut tokens = BTreeSet::new();
        if settings.tokens.is_empty() {
            tokens.extend(check.default_tokens().iter().copied());
        } else {
            tokens.extend(check.required_tokens().iter().copied());
            let acceptable = check.acceptable_tokens();
            for name in &settings.tokens {
                let kind = K::catalog().kind_of_name(name)?;
                if !acceptable.contains(&kind) {
                    return Err(LinterError::config(format!(
                        "Token \"{}\" was not found in Acceptable tokens list in check {}",
                        name,
                        check.name()
                    )));
                }
                tokens.insert(kind);
            }
        }

        check.init();
        debug!("Registered check {} for {} token kinds", check.name(), tokens.len());

        let entry = RegisteredCheck {
            check,
            settings,
            sequence: self.registered,
            tokens,
            violations: BTreeSet::new(),
        };
        self.registered += 1;
        let position = self
            .checks
            .partition_point(|existing| existing.order(&entry) == Ordering::Less);
        self.checks.insert(position, entry);
        self.rebuild_dispatch();
        Ok(())
    }

    fn rebuild_dispatch(&mut self) {
        for slot in &mut self.dispatch {
            slot.clear();
        }
        for (index, entry) in self.checks.iter().enumerate() {
            for kind in &entry.tokens {
                self.dispatch[kind.id() as usize].push(index);
            }
        }
    }

    pub fn add_filter(&mut self, filter: Arc<dyn ViolationFilter>) {
        self.filters.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Names and ids of the checks registered for `kind`, in dispatch order.
    pub fn checks_for(&self, kind: K) -> Vec<(&'static str, Option<&str>)> {
        self.dispatch[kind.id() as usize]
            .iter()
            .map(|&index| {
                let entry = &self.checks[index];
                (entry.check.name(), entry.settings.id.as_deref())
            })
            .collect()
    }

    /// Runs every registered check over `tree`, parsed from `source`.
    ///
    /// Returns the sorted violations that pass all filters. Check buffers
    /// are cleared afterwards, so the walker can be reused for the next file.
    pub fn walk(&mut self, path: &Path, source: &str, tree: &Tree<'_, K>) -> Vec<Violation> {
        if self.checks.is_empty() {
            return Vec::new();
        }

        let file = FileText::new(source);
        let root = tree.root_node();

        self.notify_begin(&file, root);
        if let Some(root) = root {
            self.process(&file, root);
        }
        self.notify_end(&file, root);

        let mut violations = BTreeSet::new();
        for entry in &mut self.checks {
            violations.append(&mut entry.violations);
        }
        let kept: Vec<Violation> = violations
            .into_iter()
            .filter(|violation| {
                let event = FilterEvent {
                    path,
                    file: &file,
                    violation,
                };
                self.filters.iter().all(|filter| filter.accept(&event))
            })
            .collect();

        trace!("Walked {} with {} violations", path.display(), kept.len());
        kept
    }

    fn context<'c, 's>(
        entry: &'c mut RegisteredCheck<K>,
        file: &'c FileText<'s>,
        tab_width: usize,
    ) -> (&'c mut Box<dyn Check<K>>, CheckContext<'c, 's>) {
        let RegisteredCheck {
            check,
            settings,
            violations,
            ..
        } = entry;
        let name = check.name();
        (check, CheckContext::new(name, settings, file, tab_width, violations))
    }

    fn notify_begin(&mut self, file: &FileText<'_>, root: Option<NodeRef<'_, K>>) {
        for entry in &mut self.checks {
            entry.violations.clear();
            let (check, mut ctx) = Self::context(entry, file, self.tab_width);
            check.begin_tree(&mut ctx, root);
        }
    }

    fn notify_end(&mut self, file: &FileText<'_>, root: Option<NodeRef<'_, K>>) {
        for entry in &mut self.checks {
            let (check, mut ctx) = Self::context(entry, file, self.tab_width);
            check.finish_tree(&mut ctx, root);
        }
    }

    fn notify(&mut self, file: &FileText<'_>, node: NodeRef<'_, K>, event: Event) {
        let Self {
            checks,
            dispatch,
            tab_width,
            ..
        } = self;
        for &index in &dispatch[node.kind().id() as usize] {
            let (check, mut ctx) = Self::context(&mut checks[index], file, *tab_width);
            match event {
                Event::Visit => check.visit_token(&mut ctx, node),
                Event::Leave => check.leave_token(&mut ctx, node),
            }
        }
    }

    /// Pre-order visit, post-order leave, without recursion or a stack.
    fn process(&mut self, file: &FileText<'_>, root: NodeRef<'_, K>) {
        let mut current = Some(root);
        while let Some(node) = current {
            self.notify(file, node, Event::Visit);
            let mut next = node.first_child();
            let mut climbing = Some(node);
            while let (Some(up), None) = (climbing, next) {
                self.notify(file, up, Event::Leave);
                next = up.next_sibling();
                climbing = up.parent();
            }
            current = next;
        }
    }
}

impl<K: TokenKind> Drop for Walker<K> {
    fn drop(&mut self) {
        for entry in &mut self.checks {
            entry.check.destroy();
        }
    }
}
