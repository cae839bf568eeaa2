use crate::selectors;
use crate::store::{EntityState, RequestStatus};

use super::OfferCard;

#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteGroup {
    pub city: String,
    pub cards: Vec<OfferCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesView {
    Loading,
    Failed(String),
    /// "Nothing yet saved."
    Empty,
    Groups(Vec<FavoriteGroup>),
}

impl FavoritesView {
    /// Groups keep the order in which each city first appears.
    pub fn reconcile(state: &EntityState) -> Self {
        let favorites = selectors::favorites(state);
        match selectors::favorite_count(state) {
            Some(0) => return FavoritesView::Empty,
            Some(_) => {}
            None => {
                return match state.favorites.status() {
                    RequestStatus::Failed => FavoritesView::Failed(
                        state
                            .favorites
                            .error()
                            .map(ToString::to_string)
                            .unwrap_or_default(),
                    ),
                    _ if !favorites.is_empty() => FavoritesView::Groups(group(favorites)),
                    _ => FavoritesView::Loading,
                };
            }
        }
        FavoritesView::Groups(group(favorites))
    }

    pub fn len(&self) -> usize {
        match self {
            FavoritesView::Groups(groups) => groups.iter().map(|g| g.cards.len()).sum(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Card at a flat index across groups.
    pub fn card(&self, index: usize) -> Option<&OfferCard> {
        match self {
            FavoritesView::Groups(groups) => groups.iter().flat_map(|g| g.cards.iter()).nth(index),
            _ => None,
        }
    }
}

fn group(favorites: &[crate::domain::Offer]) -> Vec<FavoriteGroup> {
    let mut groups: Vec<FavoriteGroup> = Vec::new();
    for offer in favorites {
        let city = offer.city_name().unwrap_or("Other").to_string();
        let card = OfferCard::from_offer(offer);
        match groups.iter_mut().find(|group| group.city == city) {
            Some(group) => group.cards.push(card),
            None => groups.push(FavoriteGroup {
                city,
                cards: vec![card],
            }),
        }
    }
    groups
}
