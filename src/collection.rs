//! ActivityStreams collections
//!
//! [`Collection`] layers paging, navigation and item access on top of an
//! [`Object`] view. [`CollectionBuilder`] adds the matching setters and keeps
//! a collection from mixing ordered and unordered items: the first call to
//! [`CollectionBuilder::items`] or [`CollectionBuilder::ordered_items`]
//! commits the builder to that mode for good.

use serde_json::Value;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::document::{Document, Entry, Literal};
use crate::error::{ModelError, Result};
use crate::object::{Object, ObjectBuilder};
use crate::reasoner::Reasoner;
use crate::vocab::{class, prop, XSD_NON_NEGATIVE_INTEGER};

const UNORDERED_AFTER_ORDERED: &str =
    "Unordered items cannot be added when the collection already contains ordered items";
const ORDERED_AFTER_UNORDERED: &str =
    "Ordered items cannot be added when the collection already contains unordered items";

/// Items of a collection, tagged by how they were stored
#[derive(Debug, Clone, PartialEq)]
pub enum Items {
    /// A plain set of items
    Unordered(Vec<Entry>),
    /// Items unwrapped from an `@list` wrapper, in stored order
    Ordered(Vec<Entry>),
}

impl Items {
    pub fn is_ordered(&self) -> bool {
        matches!(self, Items::Ordered(_))
    }

    pub fn as_slice(&self) -> &[Entry] {
        match self {
            Items::Unordered(v) | Items::Ordered(v) => v,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn into_vec(self) -> Vec<Entry> {
        match self {
            Items::Unordered(v) | Items::Ordered(v) => v,
        }
    }
}

/// Read-only collection view
#[derive(Debug, Clone)]
pub struct Collection {
    object: Object,
    /// Computed once; later changes to the document are not observed
    ordered: bool,
}

impl Collection {
    pub fn new(document: Document, reasoner: Arc<Reasoner>, parent: Option<&Object>) -> Self {
        Self::from_object(Object::new(document, reasoner, parent))
    }

    pub fn from_object(object: Object) -> Self {
        let ordered = matches!(object.first_entry(prop::ITEMS), Some(Entry::List(_)));
        Self { object, ordered }
    }

    /// An empty collection bound to `reasoner`
    pub fn empty(reasoner: Arc<Reasoner>) -> Self {
        Self::new(Document::new(), reasoner, None)
    }

    pub fn as_object(&self) -> &Object {
        &self.object
    }

    pub fn into_object(self) -> Object {
        self.object
    }

    /// Whether the items were stored as an ordered list
    pub fn ordered(&self) -> bool {
        self.ordered
    }

    pub fn total_items(&self) -> u64 {
        self.non_negative(prop::TOTAL_ITEMS)
    }

    pub fn items_per_page(&self) -> u64 {
        self.non_negative(prop::ITEMS_PER_PAGE)
    }

    /// Lenient counter read: anything that is not a finite, non-negative
    /// number reads as 0
    fn non_negative(&self, term: &str) -> u64 {
        let literal = match self.object.first_entry(term) {
            Some(Entry::Literal(lit)) => lit,
            Some(other) => {
                debug!(property = term, value = ?other, "paging counter is not a literal, reading 0");
                return 0;
            }
            None => return 0,
        };

        if let Some(n) = literal.value.as_u64() {
            return n;
        }
        match literal.as_f64() {
            // float-to-int casts saturate, and fractions truncate
            Some(n) if n.is_finite() && n >= 0.0 => n as u64,
            _ => {
                debug!(property = term, value = %literal.value, "malformed paging counter, reading 0");
                0
            }
        }
    }

    pub fn current(&self) -> Option<Entry> {
        self.object.first_entry(prop::CURRENT)
    }

    pub fn next(&self) -> Option<Entry> {
        self.object.first_entry(prop::NEXT)
    }

    pub fn prev(&self) -> Option<Entry> {
        self.object.first_entry(prop::PREV)
    }

    pub fn first(&self) -> Option<Entry> {
        self.object.first_entry(prop::FIRST)
    }

    pub fn last(&self) -> Option<Entry> {
        self.object.first_entry(prop::LAST)
    }

    /// The `self` link
    pub fn self_link(&self) -> Option<Entry> {
        self.object.first_entry(prop::SELF)
    }

    pub fn index_range(&self) -> Option<Entry> {
        self.object.first_entry(prop::INDEX_RANGE)
    }

    pub fn published_range(&self) -> Option<Entry> {
        self.object.first_entry(prop::PUBLISHED_RANGE)
    }

    pub fn start_time_range(&self) -> Option<Entry> {
        self.object.first_entry(prop::START_TIME_RANGE)
    }

    /// Items, with an ordered-list wrapper unwrapped
    ///
    /// Returns `None` when no items are stored.
    pub fn items(&self) -> Option<Items> {
        let entries = self.object.entries(prop::ITEMS);
        if entries.is_empty() {
            return None;
        }
        if !entries[0].is_list() {
            return Some(Items::Unordered(entries));
        }

        let mut ordered = Vec::new();
        for entry in entries {
            match entry {
                Entry::List(list) => ordered.extend(list),
                other => ordered.push(other),
            }
        }
        Some(Items::Ordered(ordered))
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        self.object.document().to_json_string(pretty)
    }
}

impl Deref for Collection {
    type Target = Object;

    fn deref(&self) -> &Object {
        &self.object
    }
}

impl From<Collection> for Entry {
    fn from(collection: Collection) -> Self {
        Entry::from(collection.object)
    }
}

impl From<&Collection> for Entry {
    fn from(collection: &Collection) -> Self {
        Entry::from(&collection.object)
    }
}

/// Which kind of items a builder has committed to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemMode {
    #[default]
    Unset,
    Ordered,
    Unordered,
}

impl ItemMode {
    /// Both committed modes are terminal; crossing between them fails
    pub fn transition(self, requested: ItemMode) -> Result<ItemMode> {
        match (self, requested) {
            (ItemMode::Ordered, ItemMode::Unordered) => Err(ModelError::InvariantViolation(
                UNORDERED_AFTER_ORDERED.to_string(),
            )),
            (ItemMode::Unordered, ItemMode::Ordered) => Err(ModelError::InvariantViolation(
                ORDERED_AFTER_UNORDERED.to_string(),
            )),
            (current, ItemMode::Unset) => Ok(current),
            (_, requested) => Ok(requested),
        }
    }
}

/// Mutable companion of [`Collection`]
#[derive(Debug, Clone)]
pub struct CollectionBuilder {
    base: ObjectBuilder,
    mode: ItemMode,
}

impl CollectionBuilder {
    /// `types` are merged after `as:Collection`; `base` seeds the document
    pub fn new(reasoner: Arc<Reasoner>, types: &[String], base: Option<&Collection>) -> Self {
        let types = reasoner.merge_types(class::COLLECTION, types);
        let base = ObjectBuilder::new(reasoner, &types, base.map(Collection::as_object));
        Self {
            base,
            mode: ItemMode::Unset,
        }
    }

    pub fn item_mode(&self) -> ItemMode {
        self.mode
    }

    pub fn total_items(&mut self, val: impl Into<Value>) -> Result<&mut Self> {
        self.set_non_negative_int(prop::TOTAL_ITEMS, val.into())?;
        Ok(self)
    }

    pub fn items_per_page(&mut self, val: impl Into<Value>) -> Result<&mut Self> {
        self.set_non_negative_int(prop::ITEMS_PER_PAGE, val.into())?;
        Ok(self)
    }

    fn set_non_negative_int(&mut self, term: &str, val: Value) -> Result<()> {
        let n = coerce_non_negative_int(&val).ok_or_else(|| ModelError::InvalidValue {
            property: term.to_string(),
            reason: format!("expected a non-negative integer, got {}", val),
        })?;
        let datatype = self.base.reasoner().resolve(XSD_NON_NEGATIVE_INTEGER);
        self.base.set_entry(term, Literal::typed(n, datatype));
        Ok(())
    }

    pub fn current(&mut self, val: impl Into<Entry>) -> &mut Self {
        self.base.set_entry(prop::CURRENT, val);
        self
    }

    pub fn next(&mut self, val: impl Into<Entry>) -> &mut Self {
        self.base.set_entry(prop::NEXT, val);
        self
    }

    pub fn prev(&mut self, val: impl Into<Entry>) -> &mut Self {
        self.base.set_entry(prop::PREV, val);
        self
    }

    pub fn first(&mut self, val: impl Into<Entry>) -> &mut Self {
        self.base.set_entry(prop::FIRST, val);
        self
    }

    pub fn last(&mut self, val: impl Into<Entry>) -> &mut Self {
        self.base.set_entry(prop::LAST, val);
        self
    }

    pub fn self_link(&mut self, val: impl Into<Entry>) -> &mut Self {
        self.base.set_entry(prop::SELF, val);
        self
    }

    pub fn index_range(&mut self, val: impl Into<Entry>) -> &mut Self {
        self.base.set_entry(prop::INDEX_RANGE, val);
        self
    }

    pub fn published_range(&mut self, val: impl Into<Entry>) -> &mut Self {
        self.base.set_entry(prop::PUBLISHED_RANGE, val);
        self
    }

    pub fn start_time_range(&mut self, val: impl Into<Entry>) -> &mut Self {
        self.base.set_entry(prop::START_TIME_RANGE, val);
        self
    }

    /// Add unordered items
    ///
    /// Commits the builder to unordered mode even when `values` is empty;
    /// an empty sequence stores nothing. A single value, an array, a `Vec`
    /// or any iterator all store the same plain array. An `Entry::List`
    /// among the values is an `InvalidValue` and stores nothing.
    pub fn items<I, E>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        self.commit(ItemMode::Unordered)?;
        let values: Vec<Entry> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Ok(self);
        }
        // A list wrapper among plain items would read back as ordered
        if values.iter().any(Entry::is_list) {
            return Err(ModelError::InvalidValue {
                property: prop::ITEMS.to_string(),
                reason: "an ordered list cannot be stored as an unordered item".to_string(),
            });
        }
        self.base.set_entries(prop::ITEMS, values);
        Ok(self)
    }

    /// Add ordered items, stored inside an `@list` wrapper
    ///
    /// Same calling conventions as [`items`](Self::items).
    pub fn ordered_items<I, E>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        self.commit(ItemMode::Ordered)?;
        let values: Vec<Entry> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Ok(self);
        }
        self.base.set_entries(prop::ITEMS, vec![Entry::List(values)]);
        Ok(self)
    }

    fn commit(&mut self, requested: ItemMode) -> Result<()> {
        let next = self.mode.transition(requested).map_err(|e| {
            trace!(current = ?self.mode, requested = ?requested, "item mode conflict");
            e
        })?;
        if next != self.mode {
            debug!(mode = ?next, "collection builder committed to item mode");
        }
        self.mode = next;
        Ok(())
    }

    pub fn document(&self) -> &Document {
        self.base.document()
    }

    /// Finalize into a view; the item mode is not part of the document
    pub fn build(&self) -> Collection {
        Collection::new(
            self.base.document().clone(),
            Arc::clone(self.base.reasoner()),
            None,
        )
    }
}

impl Deref for CollectionBuilder {
    type Target = ObjectBuilder;

    fn deref(&self) -> &ObjectBuilder {
        &self.base
    }
}

impl DerefMut for CollectionBuilder {
    fn deref_mut(&mut self) -> &mut ObjectBuilder {
        &mut self.base
    }
}

/// Accept u64, non-negative integral numbers, or a decimal string of one
fn coerce_non_negative_int(val: &Value) -> Option<u64> {
    match val {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
