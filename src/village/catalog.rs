//! Fixed village price lists and recipe books.

/// An item for sale at a fixed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTag {
    pub item: &'static str,
    pub price: u64,
}

const fn tag(item: &'static str, price: u64) -> PriceTag {
    PriceTag { item, price }
}

/// The Merchant Quarter's own stock.
pub const MARKETPLACE: [PriceTag; 3] = [
    tag("Iron Sword", 500),
    tag("Wooden Armor", 300),
    tag("Healing Potion", 100),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoyalCategory {
    pub name: &'static str,
    pub items: [PriceTag; 2],
}

pub const ROYAL_CATEGORIES: [RoyalCategory; 6] = [
    RoyalCategory {
        name: "Browse Weapons",
        items: [tag("Iron Sword", 500), tag("Steel Axe", 700)],
    },
    RoyalCategory {
        name: "Resources",
        items: [tag("Wood", 50), tag("Iron Ore", 100)],
    },
    RoyalCategory {
        name: "Consumables",
        items: [tag("Bread", 20), tag("Healing Potion", 100)],
    },
    RoyalCategory {
        name: "Aesthetic Items",
        items: [tag("Fancy Hat", 200), tag("Golden Necklace", 300)],
    },
    RoyalCategory {
        name: "Armor",
        items: [tag("Wooden Armor", 300), tag("Iron Chestplate", 600)],
    },
    RoyalCategory {
        name: "Special Moves",
        items: [tag("Fireball", 1000), tag("Stealth Strike", 1200)],
    },
];

/// Tinkerer's Lab secret recipes. Ingredient order does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invention {
    pub ingredients: [&'static str; 3],
    pub result: &'static str,
}

pub const INVENTIONS: [Invention; 7] = [
    Invention {
        ingredients: ["Iron Ore", "Copper Ore", "Wood"],
        result: "Mechanical Cog",
    },
    Invention {
        ingredients: ["Fire Crystal", "Steel Ingot", "Thread"],
        result: "Flamethrower Gadget",
    },
    Invention {
        ingredients: ["Vines", "Stone", "Herbs"],
        result: "Vine Trap",
    },
    Invention {
        ingredients: ["Poisonous Berries", "Water", "Iron Ore"],
        result: "Toxic Sprayer",
    },
    Invention {
        ingredients: ["Wood", "Thread", "Copper Ore"],
        result: "Wind-Up Toy",
    },
    Invention {
        ingredients: ["Steel Ingot", "Fire Crystal", "Wood"],
        result: "Steam Pistol",
    },
    Invention {
        ingredients: ["Leather", "Iron Ore", "Vines"],
        result: "Spring-Loaded Glove",
    },
];

/// Finds the invention whose ingredients are exactly `items`, in any order.
pub fn match_invention(items: &[String]) -> Option<&'static Invention> {
    let mut picked: Vec<&str> = items.iter().map(String::as_str).collect();
    picked.sort_unstable();
    INVENTIONS.iter().find(|inv| {
        let mut wanted = inv.ingredients;
        wanted.sort_unstable();
        picked.as_slice() == wanted.as_slice()
    })
}

/// Crafting Workshop recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub result: &'static str,
    pub ingredients: [&'static str; 2],
    pub description: &'static str,
}

pub const RECIPES: [Recipe; 10] = [
    Recipe {
        result: "Iron Sword",
        ingredients: ["Iron Ore", "Wood"],
        description: "A sturdy blade for combat.",
    },
    Recipe {
        result: "Wooden Armor",
        ingredients: ["Wood", "Wood"],
        description: "Basic protection from the wilds.",
    },
    Recipe {
        result: "Steel Axe",
        ingredients: ["Steel Ingot", "Wood"],
        description: "Chops trees and foes alike.",
    },
    Recipe {
        result: "Leather Boots",
        ingredients: ["Leather", "Thread"],
        description: "Swift and silent footwear.",
    },
    Recipe {
        result: "Healing Salve",
        ingredients: ["Herbs", "Water"],
        description: "Restores minor wounds.",
    },
    Recipe {
        result: "Poison Dagger",
        ingredients: ["Iron Ore", "Poisonous Berries"],
        description: "A sneaky, toxic blade.",
    },
    Recipe {
        result: "Stone Hammer",
        ingredients: ["Stone", "Wood"],
        description: "Good for breaking rocks.",
    },
    Recipe {
        result: "Copper Ring",
        ingredients: ["Copper Ore", "Thread"],
        description: "A shiny trinket.",
    },
    Recipe {
        result: "Fire Staff",
        ingredients: ["Wood", "Fire Crystal"],
        description: "Channels fiery magic.",
    },
    Recipe {
        result: "Shield of Roots",
        ingredients: ["Wood", "Vines"],
        description: "Nature's sturdy defense.",
    },
];

impl Recipe {
    /// Ingredient name → units needed. Duplicate ingredients add up.
    pub fn requirements(&self) -> Vec<(&'static str, u32)> {
        let mut needs: Vec<(&'static str, u32)> = Vec::new();
        for name in self.ingredients {
            match needs.iter_mut().find(|(n, _)| *n == name) {
                Some((_, count)) => *count += 1,
                None => needs.push((name, 1)),
            }
        }
        needs
    }
}

/// Resource spent on every repair.
pub const REPAIR_MATERIAL: &str = "Wood";
