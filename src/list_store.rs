//! Keeps one user's income or expense list in memory, in step with the row store.
//!
//! Every mutation runs the same pipeline: persist through the [LineItemStore],
//! update the local collection, recompute the total and, if the total changed,
//! dispatch a conversion of the new total. Conversions run as background tasks
//! and are applied by [ListStore::settle_conversions]; a result is only shown if
//! no newer conversion has been dispatched since.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;

use crate::{
    Error,
    aggregate::total_amount,
    currency::{ConversionResult, CurrencyCode, CurrencyConverter, RateSource, RequestSequence},
    database_id::LineItemId,
    line_item::{LineItem, ListKind, NewLineItem, TaskLabel, parse_amount},
    stores::LineItemStore,
    user::UserID,
};

/// Where the conversion of the current total is up to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConversionStatus {
    /// No conversion has been dispatched yet.
    NotRequested,
    /// A conversion of `source_amount` is waiting on the exchange rate service.
    InFlight {
        /// The sequence number of the pending request.
        request: RequestSequence,
        /// The total being converted.
        source_amount: f64,
    },
    /// The latest conversion finished, successfully or not.
    Settled(ConversionResult),
}

impl ConversionStatus {
    /// The converted total, if the latest conversion succeeded.
    pub fn converted_amount(&self) -> Option<f64> {
        match self {
            ConversionStatus::Settled(result) => result.converted_amount,
            _ => None,
        }
    }
}

/// Everything needed to show a list to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot {
    /// Which list this is.
    pub kind: ListKind,
    /// The line items, ordered by ID.
    pub items: Vec<LineItem>,
    /// The sum of the item amounts.
    pub total: f64,
    /// The currency the total is in.
    pub source_currency: CurrencyCode,
    /// The currency the total is converted to.
    pub target_currency: CurrencyCode,
    /// The conversion of the total.
    pub conversion: ConversionStatus,
    /// The message from the last failed add, if any.
    pub error_text: Option<String>,
}

/// The in-memory copy of one user's line items for one [ListKind].
pub struct ListStore<S, R> {
    kind: ListKind,
    owner: UserID,
    store: S,
    converter: Arc<CurrencyConverter<R>>,
    items: Vec<LineItem>,
    total: f64,
    conversion: ConversionStatus,
    in_flight: JoinSet<(RequestSequence, ConversionResult)>,
    draft_task: String,
    draft_amount: String,
    error_text: Option<String>,
}

impl<S, R> ListStore<S, R>
where
    S: LineItemStore,
    R: RateSource + 'static,
{
    /// Create an empty list for `owner`. Call [ListStore::load] to fetch the stored items.
    ///
    /// Each list needs its own converter so that conversions for one list never
    /// supersede conversions for another.
    pub fn new(kind: ListKind, owner: UserID, store: S, converter: CurrencyConverter<R>) -> Self {
        Self {
            kind,
            owner,
            store,
            converter: Arc::new(converter),
            items: Vec::new(),
            total: 0.0,
            conversion: ConversionStatus::NotRequested,
            in_flight: JoinSet::new(),
            draft_task: String::new(),
            draft_amount: String::new(),
            error_text: None,
        }
    }

    /// Which list this is.
    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// The line items, ordered by ID.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The sum of the item amounts.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// The conversion of the total.
    pub fn conversion(&self) -> ConversionStatus {
        self.conversion
    }

    /// The message from the last failed add, if any.
    pub fn error_text(&self) -> Option<&str> {
        self.error_text.as_deref()
    }

    /// The task text typed so far.
    pub fn draft_task(&self) -> &str {
        &self.draft_task
    }

    /// The amount text typed so far.
    pub fn draft_amount(&self) -> &str {
        &self.draft_amount
    }

    /// Replace the collection with the stored items.
    ///
    /// # Errors
    ///
    /// Returns the store error if the items could not be fetched, leaving the
    /// collection as it was.
    pub async fn load(&mut self) -> Result<(), Error> {
        match self.store.fetch_all(self.kind, self.owner).await {
            Ok(items) => {
                tracing::debug!("Loaded {} {} items", items.len(), self.kind);
                self.items = items;
                self.recompute_total();
                Ok(())
            }
            Err(error) => {
                tracing::error!("Could not load {} items: {error}", self.kind);
                Err(error)
            }
        }
    }

    /// Store a new item and append it to the list.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyTask] without contacting the store if `task` is blank.
    /// If the store rejects the item, the error message is kept in
    /// [ListStore::error_text] and the list is left unchanged.
    pub async fn add(&mut self, task: &str, amount: Option<f64>) -> Result<LineItem, Error> {
        let task = TaskLabel::new(task)?;

        self.insert(task, amount).await
    }

    /// Set the task text of the item being entered.
    pub fn set_draft_task(&mut self, task: &str) {
        self.error_text = None;
        self.draft_task = task.to_owned();
    }

    /// Set the amount text of the item being entered.
    pub fn set_draft_amount(&mut self, amount: &str) {
        self.error_text = None;
        self.draft_amount = amount.to_owned();
    }

    /// Add the item being entered, see [ListStore::add].
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyTask] if the draft task is blank, and
    /// [Error::InvalidAmount] (also kept as the error text) if the draft amount is
    /// not a number.
    pub async fn submit_draft(&mut self) -> Result<LineItem, Error> {
        let task = TaskLabel::new(&self.draft_task)?;

        let amount = match parse_amount(&self.draft_amount) {
            Ok(amount) => amount,
            Err(error) => {
                self.error_text = Some(error.to_string());
                return Err(error);
            }
        };

        self.insert(task, amount).await
    }

    /// Remove an item from the store and then from the list.
    ///
    /// # Errors
    ///
    /// Returns the store error if the item could not be deleted, leaving the list
    /// unchanged.
    pub async fn delete(&mut self, id: LineItemId) -> Result<(), Error> {
        if let Err(error) = self.store.delete(self.kind, self.owner, id).await {
            tracing::error!("Could not delete {} item #{id}: {error}", self.kind);
            return Err(error);
        }

        tracing::info!("Deleted {} item #{id}", self.kind);
        self.items.retain(|item| item.id != id);
        self.recompute_total();

        Ok(())
    }

    /// Flip the completion flag of an item and return the stored value.
    ///
    /// The total is not affected.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if the item is not in the list, or the store error
    /// if the update failed. In both cases the list is left unchanged.
    pub async fn toggle_complete(&mut self, id: LineItemId) -> Result<bool, Error> {
        let Some(is_complete) = self
            .items
            .iter()
            .find(|item| item.id == id)
            .map(LineItem::is_complete)
        else {
            tracing::error!("Could not toggle {} item #{id}: not in the list", self.kind);
            return Err(Error::NotFound);
        };

        let updated = match self
            .store
            .set_complete(self.kind, self.owner, id, !is_complete)
            .await
        {
            Ok(updated) => updated,
            Err(error) => {
                tracing::error!("Could not toggle {} item #{id}: {error}", self.kind);
                return Err(error);
            }
        };

        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.is_complete = updated.is_complete;
        }

        Ok(updated.is_complete())
    }

    /// Wait for every dispatched conversion and apply the latest one.
    pub async fn settle_conversions(&mut self) {
        while let Some(joined) = self.in_flight.join_next().await {
            match joined {
                Ok((request, result)) => self.apply_conversion(request, result),
                Err(error) => tracing::error!("A conversion task failed: {error}"),
            }
        }

        if let ConversionStatus::InFlight { source_amount, .. } = self.conversion {
            self.conversion = ConversionStatus::Settled(ConversionResult::unavailable(source_amount));
        }
    }

    /// Apply conversions that have already finished, without waiting for the rest.
    pub fn poll_conversions(&mut self) {
        while let Some(joined) = self.in_flight.try_join_next() {
            match joined {
                Ok((request, result)) => self.apply_conversion(request, result),
                Err(error) => tracing::error!("A conversion task failed: {error}"),
            }
        }
    }

    /// A copy of the current state for display.
    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            kind: self.kind,
            items: self.items.clone(),
            total: self.total,
            source_currency: self.converter.source_currency().clone(),
            target_currency: self.converter.target_currency().clone(),
            conversion: self.conversion,
            error_text: self.error_text.clone(),
        }
    }

    async fn insert(&mut self, task: TaskLabel, amount: Option<f64>) -> Result<LineItem, Error> {
        let new_item = NewLineItem {
            task,
            amount,
            owner: self.owner,
        };

        match self.store.insert(self.kind, new_item).await {
            Ok(item) => {
                tracing::info!("Added {} item #{}", self.kind, item.id);
                self.items.push(item.clone());
                self.draft_task.clear();
                self.draft_amount.clear();
                self.error_text = None;
                self.recompute_total();
                Ok(item)
            }
            Err(error) => {
                tracing::error!("Could not add {} item: {error}", self.kind);
                self.error_text = Some(error.to_string());
                Err(error)
            }
        }
    }

    fn recompute_total(&mut self) {
        let total = total_amount(&self.items);
        let changed = total != self.total;
        self.total = total;

        if changed || self.conversion == ConversionStatus::NotRequested {
            self.request_conversion();
        }
    }

    fn request_conversion(&mut self) {
        let request = self.converter.next_request();
        let source_amount = self.total;
        let converter = Arc::clone(&self.converter);

        tracing::debug!("Dispatching conversion #{request} of {source_amount}");
        self.conversion = ConversionStatus::InFlight {
            request,
            source_amount,
        };
        self.in_flight
            .spawn(async move { (request, converter.convert(source_amount).await) });
    }

    fn apply_conversion(&mut self, request: RequestSequence, result: ConversionResult) {
        if self.converter.is_latest(request) {
            self.conversion = ConversionStatus::Settled(result);
        } else {
            tracing::debug!(
                "Discarding superseded conversion #{request} of {}",
                result.source_amount
            );
        }
    }
}
