//! Menu trees for the six village buildings.
//!
//! Every building is a tree of `MenuNode`s rendered through the one
//! `ListMenu`. Picking a row yields a `VillageCommand`; `route` turns the
//! command into a `Step` for the plugin to carry out. Half-finished
//! actions (chosen resource, typed price, picked ingredients) live in the
//! `Draft` until they are submitted or abandoned.

use rand::Rng;
use crate::menu::{InputError, ListMenu, MenuOption, ModalInput};
use crate::shared::*;
use super::catalog::{PriceTag, MARKETPLACE, RECIPES, ROYAL_CATEGORIES};
use super::economy::{liquidity_yield, EconomyAction, SimulatedLedger};

/// Ingredients the Tinkerer's Lab combines at once.
pub const INVENT_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuNode {
    LiquidityRoot,
    DepositPick,
    DepositConfirm,
    WithdrawPick,
    MerchantRoot,
    ListPick,
    ListConfirm,
    Marketplace,
    MyListings,
    ManageListing,
    EditConfirm,
    RoyalRoot,
    RoyalCategory(usize),
    TinkerRoot,
    InventPick,
    InventConfirm,
    CraftRoot,
    CraftPick,
    CraftConfirm,
    RepairPick,
    SalvagePick,
    TradingRoot,
    TradeOfferPick,
    TradeRequestPick,
    TradeListings,
}

impl MenuNode {
    /// Entry menu for a building. `None` for sites without a menu tree.
    pub fn root_for(site: VillageSite) -> Option<MenuNode> {
        match site {
            VillageSite::LiquidityBank => Some(MenuNode::LiquidityRoot),
            VillageSite::MerchantQuarter => Some(MenuNode::MerchantRoot),
            VillageSite::RoyalMarket => Some(MenuNode::RoyalRoot),
            VillageSite::TinkerersLab => Some(MenuNode::TinkerRoot),
            VillageSite::CraftingWorkshop => Some(MenuNode::CraftRoot),
            VillageSite::TradingPost => Some(MenuNode::TradingRoot),
            VillageSite::BattleMode | VillageSite::ScavengerMode | VillageSite::CampingMode => None,
        }
    }

    pub fn screen(self) -> ScreenState {
        use MenuNode::*;
        match self {
            LiquidityRoot | DepositPick | DepositConfirm | WithdrawPick => ScreenState::Liquidity,
            MerchantRoot | ListPick | ListConfirm | Marketplace | MyListings | ManageListing
            | EditConfirm => ScreenState::Merchant,
            RoyalRoot | RoyalCategory(_) => ScreenState::RoyalMarket,
            TinkerRoot | InventPick | InventConfirm => ScreenState::Tinkerer,
            CraftRoot | CraftPick | CraftConfirm | RepairPick | SalvagePick => {
                ScreenState::Crafting
            }
            TradingRoot | TradeOfferPick | TradeRequestPick | TradeListings => {
                ScreenState::Trading
            }
        }
    }

    /// Where "Back" leads. Roots have no parent; backing out of one closes
    /// the building.
    pub fn parent(self) -> Option<MenuNode> {
        use MenuNode::*;
        match self {
            LiquidityRoot | MerchantRoot | RoyalRoot | TinkerRoot | CraftRoot | TradingRoot => {
                None
            }
            DepositPick | DepositConfirm | WithdrawPick => Some(LiquidityRoot),
            ListPick | ListConfirm | Marketplace | MyListings => Some(MerchantRoot),
            ManageListing | EditConfirm => Some(MyListings),
            RoyalCategory(_) => Some(RoyalRoot),
            InventPick | InventConfirm => Some(TinkerRoot),
            CraftPick | RepairPick | SalvagePick => Some(CraftRoot),
            CraftConfirm => Some(CraftPick),
            TradeOfferPick | TradeListings => Some(TradingRoot),
            TradeRequestPick => Some(TradeOfferPick),
        }
    }
}

/// What a number typed into the modal prompt is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPurpose {
    DepositAmount,
    DepositDuration,
    ListPrice,
    EditPrice,
}

impl ModalPurpose {
    /// The step to fall back to when the entry is abandoned.
    pub fn fallback(self) -> MenuNode {
        match self {
            ModalPurpose::DepositAmount | ModalPurpose::DepositDuration => MenuNode::DepositPick,
            ModalPurpose::ListPrice => MenuNode::ListPick,
            ModalPurpose::EditPrice => MenuNode::ManageListing,
        }
    }

    pub fn invalid_message(self) -> &'static str {
        match self {
            ModalPurpose::DepositAmount | ModalPurpose::DepositDuration => {
                "Invalid input. Returning to resource selection."
            }
            ModalPurpose::ListPrice => "Invalid price. Returning to item selection.",
            ModalPurpose::EditPrice => "Invalid price. Returning to listing options.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VillageCommand {
    Open(MenuNode),
    Exit,
    PickResource(String),
    ConfirmDeposit,
    ShowDeposits,
    Withdraw(usize),
    PickListItem(String),
    ConfirmListing,
    Buy { tag: PriceTag, from: MenuNode },
    ManageListing(usize),
    EditPrice,
    ConfirmEdit,
    CancelListing,
    ToggleInvent(String),
    ConfirmInvent,
    AbandonInvent,
    PickRecipe(usize),
    Craft,
    Repair(String),
    Salvage(String),
    PickOffer(String),
    PostTrade(String),
    AcceptTrade(usize),
}

/// In-progress choices for the building that is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub resource: Option<String>,
    pub amount: u64,
    pub duration_secs: u64,
    pub item: Option<String>,
    pub price: u64,
    pub listing: Option<usize>,
    pub invent: Vec<String>,
    pub recipe: Option<usize>,
    pub offer: Option<String>,
}

/// What the plugin should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Open(MenuNode),
    Prompt(ModalPurpose),
    Submit { action: EconomyAction, then: MenuNode },
    ShowDeposits,
    Close,
}

/// Read-only state the menus are built from.
pub struct MenuContext<'a> {
    pub inventory: &'a Inventory,
    pub ledger: &'a SimulatedLedger,
    pub loot: &'a LootTable,
}

fn back(node: MenuNode) -> MenuOption<VillageCommand> {
    let command = node.parent().map_or(VillageCommand::Exit, VillageCommand::Open);
    MenuOption::new("Back", command)
}

fn with_back(
    title: impl Into<String>,
    mut options: Vec<MenuOption<VillageCommand>>,
    node: MenuNode,
) -> ListMenu<VillageCommand> {
    options.push(back(node));
    ListMenu::new(title, options)
}

fn yes_no(title: String, yes: VillageCommand, no: VillageCommand) -> ListMenu<VillageCommand> {
    ListMenu::new(
        title,
        vec![MenuOption::new("Yes", yes), MenuOption::new("No", no)],
    )
}

fn inventory_rows(
    inventory: &Inventory,
    command: impl Fn(String) -> VillageCommand,
) -> Vec<MenuOption<VillageCommand>> {
    inventory
        .iter()
        .map(|i| MenuOption::new(format!("{} x{}", i.name, i.quantity), command(i.name.clone())))
        .collect()
}

fn price_rows(tags: &[PriceTag], from: MenuNode) -> Vec<MenuOption<VillageCommand>> {
    tags.iter()
        .map(|t| {
            MenuOption::new(
                format!("{} - {} OROMOZI", t.item, t.price),
                VillageCommand::Buy { tag: *t, from },
            )
        })
        .collect()
}

/// Builds the list for `node`. `Err` carries the notice to show when the
/// menu would be empty; the caller then falls back to the parent.
pub fn build_menu(
    node: MenuNode,
    ctx: &MenuContext,
    draft: &Draft,
) -> Result<ListMenu<VillageCommand>, String> {
    use VillageCommand as C;
    let open = |label: &str, target: MenuNode| MenuOption::new(label, C::Open(target));

    let menu = match node {
        MenuNode::LiquidityRoot => with_back(
            "Liquidity Pool Options:\nSelect an option:",
            vec![
                open("Deposit Resource", MenuNode::DepositPick),
                MenuOption::new("View Deposits & Yield", C::ShowDeposits),
                open("Withdraw Resources", MenuNode::WithdrawPick),
            ],
            node,
        ),
        MenuNode::DepositPick => {
            let rows: Vec<_> = ctx
                .inventory
                .iter()
                .filter(|i| ctx.loot.item(&i.name).is_some_and(|d| d.can_deposit))
                .map(|i| {
                    MenuOption::new(
                        format!("{} x{}", i.name, i.quantity),
                        C::PickResource(i.name.clone()),
                    )
                })
                .collect();
            if rows.is_empty() {
                return Err("No depositable resources available.".into());
            }
            with_back("Select a resource to deposit:", rows, node)
        }
        MenuNode::DepositConfirm => {
            let resource = draft.resource.as_deref().unwrap_or_default();
            let estimate = liquidity_yield(draft.amount, draft.duration_secs.saturating_mul(1000));
            yes_no(
                format!(
                    "Deposit {} {} for {} seconds?\nEstimated yield: {} OROMOZI",
                    draft.amount, resource, draft.duration_secs, estimate
                ),
                C::ConfirmDeposit,
                C::Open(MenuNode::LiquidityRoot),
            )
        }
        MenuNode::WithdrawPick => {
            if ctx.ledger.deposits.is_empty() {
                return Err("You have no deposits to withdraw.".into());
            }
            let rows = ctx
                .ledger
                .deposits
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    MenuOption::new(format!("{} {} units", d.resource, d.amount), C::Withdraw(i))
                })
                .collect();
            with_back("Select a deposit to withdraw:", rows, node)
        }
        MenuNode::MerchantRoot => with_back(
            "Merchant Quarter:\nSelect an option:",
            vec![
                open("List Item for Sale", MenuNode::ListPick),
                open("Browse Marketplace", MenuNode::Marketplace),
                open("My Listings", MenuNode::MyListings),
            ],
            node,
        ),
        MenuNode::ListPick => {
            if ctx.inventory.is_empty() {
                return Err("Your inventory is empty.".into());
            }
            with_back(
                "Select an item to list:",
                inventory_rows(ctx.inventory, C::PickListItem),
                node,
            )
        }
        MenuNode::ListConfirm => yes_no(
            format!(
                "List {} for {} OROMOZI?",
                draft.item.as_deref().unwrap_or_default(),
                draft.price
            ),
            C::ConfirmListing,
            C::Open(MenuNode::ListPick),
        ),
        MenuNode::Marketplace => with_back("Marketplace:", price_rows(&MARKETPLACE, node), node),
        MenuNode::MyListings => {
            if ctx.ledger.listings.is_empty() {
                return Err("You have no active listings.".into());
            }
            let rows = ctx
                .ledger
                .listings
                .iter()
                .enumerate()
                .map(|(i, l)| {
                    MenuOption::new(
                        format!("{} x{} - {} OROMOZI", l.item, l.quantity, l.price),
                        C::ManageListing(i),
                    )
                })
                .collect();
            with_back("Your Listings:", rows, node)
        }
        MenuNode::ManageListing => {
            let listing = draft
                .listing
                .and_then(|i| ctx.ledger.listings.get(i))
                .ok_or_else(|| "That listing no longer exists.".to_string())?;
            with_back(
                format!("{} - {} OROMOZI", listing.item, listing.price),
                vec![
                    MenuOption::new("Edit Price", C::EditPrice),
                    MenuOption::new("Cancel Listing", C::CancelListing),
                ],
                node,
            )
        }
        MenuNode::EditConfirm => yes_no(
            format!("Change price to {} OROMOZI?", draft.price),
            C::ConfirmEdit,
            C::Open(MenuNode::ManageListing),
        ),
        MenuNode::RoyalRoot => with_back(
            "Royal Market:\nSelect a category:",
            ROYAL_CATEGORIES
                .iter()
                .enumerate()
                .map(|(i, c)| open(c.name, MenuNode::RoyalCategory(i)))
                .collect(),
            node,
        ),
        MenuNode::RoyalCategory(index) => {
            let category = ROYAL_CATEGORIES
                .get(index)
                .ok_or_else(|| "That category does not exist.".to_string())?;
            with_back(format!("{}:", category.name), price_rows(&category.items, node), node)
        }
        MenuNode::TinkerRoot => with_back(
            "Tinkerer's Lab:\nSelect an option:",
            vec![open("Invent Item", MenuNode::InventPick)],
            node,
        ),
        MenuNode::InventPick => {
            if ctx.inventory.len() < INVENT_SLOTS {
                return Err("You need at least 3 items to invent something.".into());
            }
            let rows = ctx
                .inventory
                .iter()
                .map(|i| {
                    let mark = if draft.invent.contains(&i.name) { "[x]" } else { "[ ]" };
                    MenuOption::new(format!("{} {}", mark, i.name), C::ToggleInvent(i.name.clone()))
                })
                .collect();
            with_back(
                format!("Select {} items ({}/{}):", INVENT_SLOTS, draft.invent.len(), INVENT_SLOTS),
                rows,
                node,
            )
        }
        MenuNode::InventConfirm => yes_no(
            format!("Combine {}?", draft.invent.join(", ")),
            C::ConfirmInvent,
            C::AbandonInvent,
        ),
        MenuNode::CraftRoot => with_back(
            "Crafting Workshop:\nSelect an option:",
            vec![
                open("Craft Item", MenuNode::CraftPick),
                open("Repair Item", MenuNode::RepairPick),
                open("Salvage Item", MenuNode::SalvagePick),
            ],
            node,
        ),
        MenuNode::CraftPick => with_back(
            "Select a recipe:",
            RECIPES
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    MenuOption::new(
                        format!("{} ({} + {})", r.result, r.ingredients[0], r.ingredients[1]),
                        C::PickRecipe(i),
                    )
                })
                .collect(),
            node,
        ),
        MenuNode::CraftConfirm => {
            let recipe = draft
                .recipe
                .and_then(|i| RECIPES.get(i))
                .ok_or_else(|| "No recipe selected.".to_string())?;
            with_back(
                format!(
                    "{}\n{}\nRequires: {}",
                    recipe.result,
                    recipe.description,
                    recipe.ingredients.join(", ")
                ),
                vec![MenuOption::new("Craft", C::Craft)],
                node,
            )
        }
        MenuNode::RepairPick | MenuNode::SalvagePick => {
            if ctx.inventory.is_empty() {
                return Err("Your inventory is empty.".into());
            }
            let (title, rows) = if node == MenuNode::RepairPick {
                ("Select an item to repair:", inventory_rows(ctx.inventory, C::Repair))
            } else {
                ("Select an item to salvage:", inventory_rows(ctx.inventory, C::Salvage))
            };
            with_back(title, rows, node)
        }
        MenuNode::TradingRoot => with_back(
            "Trading Post:\nSelect an option:",
            vec![
                open("Post Trade", MenuNode::TradeOfferPick),
                open("View Trades", MenuNode::TradeListings),
            ],
            node,
        ),
        MenuNode::TradeOfferPick => {
            if ctx.inventory.is_empty() {
                return Err("Your inventory is empty.".into());
            }
            with_back(
                "Select an item to offer:",
                inventory_rows(ctx.inventory, C::PickOffer),
                node,
            )
        }
        MenuNode::TradeRequestPick => with_back(
            format!(
                "Offering {}. Select an item to request:",
                draft.offer.as_deref().unwrap_or_default()
            ),
            ctx.loot
                .all_item_names()
                .into_iter()
                .map(|name| MenuOption::new(name.clone(), C::PostTrade(name)))
                .collect(),
            node,
        ),
        MenuNode::TradeListings => {
            if ctx.ledger.trades.is_empty() {
                return Err("No trades available.".into());
            }
            let rows = ctx
                .ledger
                .trades
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    MenuOption::new(
                        format!("Offer: {} x{} | Wants: {}", t.offer, t.quantity, t.request),
                        C::AcceptTrade(i),
                    )
                })
                .collect();
            with_back("Available Trades:", rows, node)
        }
    };
    Ok(menu)
}

/// Interprets a picked row.
pub fn route(command: VillageCommand, draft: &mut Draft, rng: &mut impl Rng) -> Step {
    use VillageCommand as C;
    match command {
        C::Open(node) => {
            if matches!(node, MenuNode::InventPick | MenuNode::TinkerRoot) {
                draft.invent.clear();
            }
            Step::Open(node)
        }
        C::Exit => {
            *draft = Draft::default();
            Step::Close
        }
        C::PickResource(name) => {
            draft.resource = Some(name);
            Step::Prompt(ModalPurpose::DepositAmount)
        }
        C::ConfirmDeposit => match draft.resource.take() {
            Some(resource) => Step::Submit {
                action: EconomyAction::Deposit {
                    resource,
                    amount: draft.amount,
                    duration_secs: draft.duration_secs,
                },
                then: MenuNode::LiquidityRoot,
            },
            None => Step::Open(MenuNode::DepositPick),
        },
        C::ShowDeposits => Step::ShowDeposits,
        C::Withdraw(deposit) => Step::Submit {
            action: EconomyAction::Withdraw { deposit },
            then: MenuNode::LiquidityRoot,
        },
        C::PickListItem(name) => {
            draft.item = Some(name);
            Step::Prompt(ModalPurpose::ListPrice)
        }
        C::ConfirmListing => match draft.item.take() {
            Some(item) => Step::Submit {
                action: EconomyAction::ListItem {
                    item,
                    price: draft.price,
                    nonce: rng.gen(),
                },
                then: MenuNode::MerchantRoot,
            },
            None => Step::Open(MenuNode::ListPick),
        },
        C::Buy { tag, from } => Step::Submit {
            action: EconomyAction::Buy {
                item: tag.item.to_string(),
                price: tag.price,
            },
            then: from,
        },
        C::ManageListing(index) => {
            draft.listing = Some(index);
            Step::Open(MenuNode::ManageListing)
        }
        C::EditPrice => Step::Prompt(ModalPurpose::EditPrice),
        C::ConfirmEdit | C::CancelListing => {
            let Some(listing) = draft.listing.take() else {
                return Step::Open(MenuNode::MyListings);
            };
            let action = if command == C::ConfirmEdit {
                EconomyAction::EditPrice {
                    listing,
                    price: draft.price,
                }
            } else {
                EconomyAction::CancelListing { listing }
            };
            Step::Submit {
                action,
                then: MenuNode::MerchantRoot,
            }
        }
        C::ToggleInvent(name) => {
            if let Some(pos) = draft.invent.iter().position(|n| *n == name) {
                draft.invent.remove(pos);
            } else {
                draft.invent.push(name);
            }
            if draft.invent.len() >= INVENT_SLOTS {
                Step::Open(MenuNode::InventConfirm)
            } else {
                Step::Open(MenuNode::InventPick)
            }
        }
        C::ConfirmInvent => Step::Submit {
            action: EconomyAction::Invent {
                items: std::mem::take(&mut draft.invent),
            },
            then: MenuNode::TinkerRoot,
        },
        C::AbandonInvent => {
            draft.invent.clear();
            Step::Open(MenuNode::TinkerRoot)
        }
        C::PickRecipe(index) => {
            draft.recipe = Some(index);
            Step::Open(MenuNode::CraftConfirm)
        }
        C::Craft => match draft.recipe.and_then(|i| RECIPES.get(i)) {
            Some(recipe) => Step::Submit {
                action: EconomyAction::Craft { recipe: *recipe },
                then: MenuNode::CraftPick,
            },
            None => Step::Open(MenuNode::CraftPick),
        },
        C::Repair(item) => Step::Submit {
            action: EconomyAction::Repair { item },
            then: MenuNode::CraftRoot,
        },
        C::Salvage(item) => Step::Submit {
            action: EconomyAction::Salvage { item },
            then: MenuNode::CraftRoot,
        },
        C::PickOffer(item) => {
            draft.offer = Some(item);
            Step::Open(MenuNode::TradeRequestPick)
        }
        C::PostTrade(request) => match draft.offer.take() {
            Some(offer) => Step::Submit {
                action: EconomyAction::PostTrade { offer, request },
                then: MenuNode::TradingRoot,
            },
            None => Step::Open(MenuNode::TradeOfferPick),
        },
        C::AcceptTrade(trade) => Step::Submit {
            action: EconomyAction::AcceptTrade { trade },
            then: MenuNode::TradingRoot,
        },
    }
}

/// The numeric prompt for `purpose`, pre-filled with its usual value.
pub fn modal_for(
    purpose: ModalPurpose,
    draft: &Draft,
    inventory: &Inventory,
    ledger: &SimulatedLedger,
) -> ModalInput<ModalPurpose> {
    match purpose {
        ModalPurpose::DepositAmount => {
            let resource = draft.resource.as_deref().unwrap_or_default();
            ModalInput::new(
                format!(
                    "Enter amount of {} to deposit (you have {}):",
                    resource,
                    inventory.count(resource)
                ),
                "10",
                purpose,
            )
        }
        ModalPurpose::DepositDuration => {
            ModalInput::new("Enter lockup duration in seconds:", "604800", purpose)
        }
        ModalPurpose::ListPrice => ModalInput::new(
            format!(
                "Enter price in OROMOZI for {}:",
                draft.item.as_deref().unwrap_or_default()
            ),
            "1000",
            purpose,
        ),
        ModalPurpose::EditPrice => {
            let current = draft
                .listing
                .and_then(|i| ledger.listings.get(i))
                .map_or(0, |l| l.price);
            ModalInput::new("Enter new price:", &current.to_string(), purpose)
        }
    }
}

/// Takes a submitted number. `Err` holds the notice and the step to fall
/// back to; nothing in the draft is kept from a rejected entry.
pub fn accept_modal(
    purpose: ModalPurpose,
    entered: Result<u64, InputError>,
    draft: &mut Draft,
    inventory: &Inventory,
) -> Result<Step, (&'static str, MenuNode)> {
    let reject = (purpose.invalid_message(), purpose.fallback());
    let value = entered.map_err(|_| reject)?;
    match purpose {
        ModalPurpose::DepositAmount => {
            let held = draft
                .resource
                .as_deref()
                .map_or(0, |r| inventory.count(r)) as u64;
            if value == 0 || value > held {
                return Err(reject);
            }
            draft.amount = value;
            Ok(Step::Prompt(ModalPurpose::DepositDuration))
        }
        ModalPurpose::DepositDuration => {
            if value == 0 {
                return Err(reject);
            }
            draft.duration_secs = value;
            Ok(Step::Open(MenuNode::DepositConfirm))
        }
        ModalPurpose::ListPrice => {
            draft.price = value;
            Ok(Step::Open(MenuNode::ListConfirm))
        }
        ModalPurpose::EditPrice => {
            draft.price = value;
            Ok(Step::Open(MenuNode::EditConfirm))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::village::economy::Listing;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn loot() -> LootTable {
        let item = |name: &str, can_deposit: bool| LootItem {
            name: name.into(),
            stat_effects: BTreeMap::new(),
            resist: BTreeMap::new(),
            combat_effects: CombatEffects::default(),
            can_deposit,
        };
        LootTable {
            zones: BTreeMap::from([(
                "Village".to_string(),
                vec![item("Iron Ore", true), item("Bread", false)],
            )]),
        }
    }

    fn labels(menu: &ListMenu<VillageCommand>) -> Vec<&str> {
        menu.options().iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn test_every_node_maps_to_a_module_screen() {
        for node in [
            MenuNode::LiquidityRoot,
            MenuNode::EditConfirm,
            MenuNode::RoyalCategory(3),
            MenuNode::InventConfirm,
            MenuNode::SalvagePick,
            MenuNode::TradeListings,
        ] {
            assert!(node.screen().is_module_ui());
        }
        assert_eq!(MenuNode::TradeRequestPick.parent(), Some(MenuNode::TradeOfferPick));
        assert_eq!(MenuNode::CraftRoot.parent(), None);
    }

    #[test]
    fn test_root_back_exits() {
        let inventory = Inventory::default();
        let ledger = SimulatedLedger::default();
        let loot = loot();
        let ctx = MenuContext {
            inventory: &inventory,
            ledger: &ledger,
            loot: &loot,
        };
        let menu = build_menu(MenuNode::LiquidityRoot, &ctx, &Draft::default()).unwrap();
        assert_eq!(
            labels(&menu),
            ["Deposit Resource", "View Deposits & Yield", "Withdraw Resources", "Back"]
        );
        assert_eq!(menu.options()[3].command, VillageCommand::Exit);
    }

    #[test]
    fn test_deposit_pick_lists_only_depositable_items() {
        let inventory = Inventory::from_items([
            InventoryItem::new("Bread", 2),
            InventoryItem::new("Iron Ore", 5),
        ]);
        let ledger = SimulatedLedger::default();
        let loot = loot();
        let ctx = MenuContext {
            inventory: &inventory,
            ledger: &ledger,
            loot: &loot,
        };
        let menu = build_menu(MenuNode::DepositPick, &ctx, &Draft::default()).unwrap();
        assert_eq!(labels(&menu), ["Iron Ore x5", "Back"]);

        let bread_only = Inventory::from_items([InventoryItem::new("Bread", 2)]);
        let ctx = MenuContext {
            inventory: &bread_only,
            ..ctx
        };
        assert_eq!(
            build_menu(MenuNode::DepositPick, &ctx, &Draft::default()).unwrap_err(),
            "No depositable resources available."
        );
    }

    #[test]
    fn test_invent_needs_three_stacks() {
        let inventory = Inventory::from_items([
            InventoryItem::new("Wood", 4),
            InventoryItem::new("Stone", 1),
        ]);
        let ledger = SimulatedLedger::default();
        let loot = loot();
        let ctx = MenuContext {
            inventory: &inventory,
            ledger: &ledger,
            loot: &loot,
        };
        assert_eq!(
            build_menu(MenuNode::InventPick, &ctx, &Draft::default()).unwrap_err(),
            "You need at least 3 items to invent something."
        );
    }

    #[test]
    fn test_third_pick_moves_to_confirm() {
        let mut draft = Draft::default();
        let mut rng = StdRng::seed_from_u64(1);
        for name in ["Wood", "Stone"] {
            assert_eq!(
                route(VillageCommand::ToggleInvent(name.into()), &mut draft, &mut rng),
                Step::Open(MenuNode::InventPick)
            );
        }
        route(VillageCommand::ToggleInvent("Stone".into()), &mut draft, &mut rng);
        assert_eq!(draft.invent, ["Wood"]);
        route(VillageCommand::ToggleInvent("Vines".into()), &mut draft, &mut rng);
        let step = route(VillageCommand::ToggleInvent("Herbs".into()), &mut draft, &mut rng);
        assert_eq!(step, Step::Open(MenuNode::InventConfirm));
        let Step::Submit { action, .. } =
            route(VillageCommand::ConfirmInvent, &mut draft, &mut rng)
        else {
            panic!("expected a submission");
        };
        assert_eq!(
            action,
            EconomyAction::Invent {
                items: vec!["Wood".into(), "Vines".into(), "Herbs".into()]
            }
        );
        assert!(draft.invent.is_empty());
    }

    #[test]
    fn test_deposit_amount_is_bounded_by_holdings() {
        let inventory = Inventory::from_items([InventoryItem::new("Iron Ore", 5)]);
        let mut draft = Draft {
            resource: Some("Iron Ore".into()),
            ..Default::default()
        };
        let rejected = accept_modal(ModalPurpose::DepositAmount, Ok(6), &mut draft, &inventory);
        assert_eq!(
            rejected,
            Err(("Invalid input. Returning to resource selection.", MenuNode::DepositPick))
        );
        assert_eq!(draft.amount, 0);
        let accepted = accept_modal(ModalPurpose::DepositAmount, Ok(5), &mut draft, &inventory);
        assert_eq!(accepted, Ok(Step::Prompt(ModalPurpose::DepositDuration)));
        assert_eq!(draft.amount, 5);
    }

    #[test]
    fn test_bad_price_returns_to_listing_options() {
        let mut draft = Draft::default();
        let result = accept_modal(
            ModalPurpose::EditPrice,
            Err(InputError::NotANumber("abc".into())),
            &mut draft,
            &Inventory::default(),
        );
        assert_eq!(
            result,
            Err(("Invalid price. Returning to listing options.", MenuNode::ManageListing))
        );
    }

    #[test]
    fn test_edit_prompt_defaults_to_current_price() {
        let ledger = SimulatedLedger {
            listings: vec![Listing {
                item: "Bread".into(),
                quantity: 1,
                price: 640,
                nonce: 3,
            }],
            ..Default::default()
        };
        let draft = Draft {
            listing: Some(0),
            ..Default::default()
        };
        let modal = modal_for(ModalPurpose::EditPrice, &draft, &Inventory::default(), &ledger);
        assert_eq!(modal.buffer, "640");
    }
}
