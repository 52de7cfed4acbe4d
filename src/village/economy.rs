//! The simulated ledger behind every village building.
//!
//! Actions are checked against a read-only view of the player's holdings
//! and answered immediately. A `Receipt` lists exactly what to add and
//! remove; the caller applies it. The ledger itself only keeps its own
//! books: deposits, merchant listings and trade offers.

use std::fmt;

use bevy::prelude::Resource;
use rand::Rng;
use crate::shared::*;
use super::catalog::{match_invention, Recipe, REPAIR_MATERIAL};

/// Yield rate: units per unit deposited per day.
pub const YIELD_PER_DAY: u64 = 50;
const MS_PER_DAY: u128 = 86_400_000;

/// `floor(amount * elapsed_days * 50)`, computed in whole milliseconds.
pub fn liquidity_yield(amount: u64, elapsed_ms: u64) -> u64 {
    let raw = amount as u128 * elapsed_ms as u128 * YIELD_PER_DAY as u128 / MS_PER_DAY;
    u64::try_from(raw).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    pub resource: String,
    pub amount: u64,
    pub duration_secs: u64,
    pub start_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub item: String,
    pub quantity: u32,
    pub price: u64,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOffer {
    pub offer: String,
    pub quantity: u32,
    pub request: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EconomyAction {
    ListItem { item: String, price: u64, nonce: u64 },
    Buy { item: String, price: u64 },
    EditPrice { listing: usize, price: u64 },
    CancelListing { listing: usize },
    Deposit { resource: String, amount: u64, duration_secs: u64 },
    Withdraw { deposit: usize },
    Craft { recipe: Recipe },
    Repair { item: String },
    Salvage { item: String },
    Invent { items: Vec<String> },
    PostTrade { offer: String, request: String },
    AcceptTrade { trade: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    InsufficientFunds { price: u64, held: u64 },
    MissingIngredients(Vec<&'static str>),
    MissingItems,
    MissingItem(String),
    NoRepairMaterial,
    NotDepositable(String),
    InvalidAmount { wanted: u64, held: u32 },
    NoSuchListing(usize),
    NoSuchDeposit(usize),
    NoSuchTrade(usize),
}

impl fmt::Display for EconomyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EconomyError::InsufficientFunds { .. } => {
                write!(f, "Insufficient OROMOZI to purchase this item!")
            }
            EconomyError::MissingIngredients(names) => {
                write!(f, "You don't have all required ingredients: {}", names.join(", "))
            }
            EconomyError::MissingItems => write!(f, "You don't have all the required items!"),
            EconomyError::MissingItem(name) => write!(f, "You don't have {name} to trade!"),
            EconomyError::NoRepairMaterial => {
                write!(f, "You don't have {REPAIR_MATERIAL} to repair this item!")
            }
            EconomyError::NotDepositable(name) => write!(f, "{name} cannot be deposited."),
            EconomyError::InvalidAmount { wanted, held } => {
                write!(f, "Cannot deposit {wanted} units; you hold {held}.")
            }
            EconomyError::NoSuchListing(i) => write!(f, "Listing {i} no longer exists."),
            EconomyError::NoSuchDeposit(i) => write!(f, "Deposit {i} no longer exists."),
            EconomyError::NoSuchTrade(i) => write!(f, "Trade {i} no longer exists."),
        }
    }
}

/// What an accepted action does to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    pub message: String,
    pub add: Vec<InventoryItem>,
    pub remove: Vec<InventoryItem>,
    pub currency_in: u64,
    pub currency_out: u64,
}

impl Receipt {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    fn adding(mut self, name: &str, quantity: u32) -> Self {
        self.add.push(InventoryItem::new(name, quantity));
        self
    }

    fn removing(mut self, name: &str, quantity: u32) -> Self {
        self.remove.push(InventoryItem::new(name, quantity));
        self
    }

    pub fn apply(&self, inventory: &mut Inventory, stats: &mut PlayerStats) {
        for item in &self.remove {
            inventory.remove(&item.name, item.quantity);
        }
        for item in &self.add {
            inventory.add(&item.name, item.quantity);
        }
        stats.oromozi = stats
            .oromozi
            .saturating_sub(self.currency_out)
            .saturating_add(self.currency_in);
    }
}

/// Read-only picture of the player for validation.
pub struct Holdings<'a> {
    pub inventory: &'a Inventory,
    pub oromozi: u64,
    pub loot: &'a LootTable,
    pub zone: ZoneId,
    pub now_ms: u64,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SimulatedLedger {
    pub deposits: Vec<Deposit>,
    pub listings: Vec<Listing>,
    pub trades: Vec<TradeOffer>,
}

impl SimulatedLedger {
    pub fn submit(
        &mut self,
        action: EconomyAction,
        holdings: &Holdings,
        rng: &mut impl Rng,
    ) -> Result<Receipt, EconomyError> {
        let inv = holdings.inventory;
        match action {
            EconomyAction::ListItem { item, price, nonce } => {
                if !inv.has(&item, 1) {
                    return Err(EconomyError::MissingItem(item));
                }
                self.listings.push(Listing {
                    item: item.clone(),
                    quantity: 1,
                    price,
                    nonce,
                });
                Ok(Receipt::new("Merchant listing created successfully (simulated).")
                    .removing(&item, 1))
            }
            EconomyAction::Buy { item, price } => {
                if holdings.oromozi < price {
                    return Err(EconomyError::InsufficientFunds {
                        price,
                        held: holdings.oromozi,
                    });
                }
                let mut receipt = Receipt::new(format!(
                    "Purchased {item} for {price} OROMOZI (simulated)."
                ))
                .adding(&item, 1);
                receipt.currency_out = price;
                Ok(receipt)
            }
            EconomyAction::EditPrice { listing, price } => {
                let entry = self
                    .listings
                    .get_mut(listing)
                    .ok_or(EconomyError::NoSuchListing(listing))?;
                entry.price = price;
                Ok(Receipt::new(format!("Listing price updated to {price} (simulated).")))
            }
            EconomyAction::CancelListing { listing } => {
                if listing >= self.listings.len() {
                    return Err(EconomyError::NoSuchListing(listing));
                }
                let entry = self.listings.remove(listing);
                Ok(Receipt::new(format!("Listing for {} cancelled (simulated).", entry.item))
                    .adding(&entry.item, entry.quantity))
            }
            EconomyAction::Deposit {
                resource,
                amount,
                duration_secs,
            } => {
                let depositable = holdings.loot.item(&resource).is_some_and(|i| i.can_deposit);
                if !depositable {
                    return Err(EconomyError::NotDepositable(resource));
                }
                let held = inv.count(&resource);
                if amount == 0 || amount > held as u64 {
                    return Err(EconomyError::InvalidAmount { wanted: amount, held });
                }
                self.deposits.push(Deposit {
                    resource: resource.clone(),
                    amount,
                    duration_secs,
                    start_ms: holdings.now_ms,
                });
                Ok(Receipt::new("Liquidity deposit successful (simulated).")
                    .removing(&resource, amount as u32))
            }
            EconomyAction::Withdraw { deposit } => {
                if deposit >= self.deposits.len() {
                    return Err(EconomyError::NoSuchDeposit(deposit));
                }
                let entry = self.deposits.remove(deposit);
                let earned = liquidity_yield(
                    entry.amount,
                    holdings.now_ms.saturating_sub(entry.start_ms),
                );
                let mut receipt = Receipt::new(format!(
                    "Withdrawn {} units + {} yield (simulated).",
                    entry.amount, earned
                ));
                receipt.currency_in = entry.amount + earned;
                Ok(receipt)
            }
            EconomyAction::Craft { recipe } => {
                let needs = recipe.requirements();
                if needs.iter().any(|(name, n)| !inv.has(name, *n)) {
                    return Err(EconomyError::MissingIngredients(recipe.ingredients.to_vec()));
                }
                let mut receipt =
                    Receipt::new(format!("Crafted {} (simulated).", recipe.result))
                        .adding(recipe.result, 1);
                for (name, n) in needs {
                    receipt = receipt.removing(name, n);
                }
                Ok(receipt)
            }
            EconomyAction::Repair { item } => {
                if !inv.has(REPAIR_MATERIAL, 1) {
                    return Err(EconomyError::NoRepairMaterial);
                }
                Ok(Receipt::new(format!("Repaired {item} (simulated)."))
                    .removing(REPAIR_MATERIAL, 1))
            }
            EconomyAction::Salvage { item } => {
                if !inv.has(&item, 1) {
                    return Err(EconomyError::MissingItem(item));
                }
                let salvage = holdings.loot.random_for_zone(holdings.zone, rng);
                Ok(Receipt::new(format!("Salvaged {item} into {salvage} (simulated)."))
                    .removing(&item, 1)
                    .adding(&salvage, 1))
            }
            EconomyAction::Invent { items } => {
                if items.iter().any(|name| !inv.has(name, 1)) {
                    return Err(EconomyError::MissingItems);
                }
                let mut receipt = match match_invention(&items) {
                    Some(found) => Receipt::new(format!(
                        "Invention succeeded! Created {} (simulated).",
                        found.result
                    ))
                    .adding(found.result, 1),
                    None => Receipt::new("Invention failed! Items consumed (simulated)."),
                };
                for name in &items {
                    receipt = receipt.removing(name, 1);
                }
                Ok(receipt)
            }
            EconomyAction::PostTrade { offer, request } => {
                if !inv.has(&offer, 1) {
                    return Err(EconomyError::MissingItem(offer));
                }
                self.trades.push(TradeOffer {
                    offer: offer.clone(),
                    quantity: 1,
                    request: request.clone(),
                });
                Ok(Receipt::new(format!("Trade posted: {offer} for {request} (simulated)."))
                    .removing(&offer, 1))
            }
            EconomyAction::AcceptTrade { trade } => {
                let entry = self
                    .trades
                    .get(trade)
                    .ok_or(EconomyError::NoSuchTrade(trade))?;
                if !inv.has(&entry.request, 1) {
                    return Err(EconomyError::MissingItem(entry.request.clone()));
                }
                let entry = self.trades.remove(trade);
                Ok(Receipt::new(format!(
                    "Trade accepted: Received {} for {} (simulated).",
                    entry.offer, entry.request
                ))
                .removing(&entry.request, 1)
                .adding(&entry.offer, entry.quantity))
            }
        }
    }

    /// One line per deposit with seconds elapsed.
    pub fn deposit_summary(&self, now_ms: u64) -> String {
        if self.deposits.is_empty() {
            return "Deposits:\nNone".into();
        }
        let lines: Vec<String> = self
            .deposits
            .iter()
            .enumerate()
            .map(|(i, d)| {
                format!(
                    "{}: {} units, {}s elapsed",
                    i,
                    d.amount,
                    now_ms.saturating_sub(d.start_ms) / 1000
                )
            })
            .collect();
        format!("Deposits:\n{}", lines.join("\n"))
    }
}
