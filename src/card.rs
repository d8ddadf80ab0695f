//! Render-side card records.

use glam::{Mat4, Quat, Vec3};
use rustc_hash::FxHashMap;

use crate::article::ArticleId;
use crate::layout::{sphere_position, GridLayout};
use crate::options::LayoutOptions;
use crate::texture::CardTexture;

/// World-space placement of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Center of the card quad.
    pub position: Vec3,
    /// Orientation; identity faces +Z.
    pub orientation: Quat,
}

impl CardTransform {
    /// Model matrix (unit scale).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }
}

/// Per-frame display state of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardAppearance {
    /// Material opacity.
    pub opacity: f32,
    /// Emissive RGB tint.
    pub emissive: [f32; 3],
}

impl Default for CardAppearance {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            emissive: [0.0; 3],
        }
    }
}

/// One card in the scene, joined to its article by id.
#[derive(Debug, Clone)]
pub struct Card {
    id: ArticleId,
    sphere_position: Vec3,
    /// Cell center in grid mode.
    pub grid_position: Vec3,
    /// Current placement.
    pub transform: CardTransform,
    /// Current display state.
    pub appearance: CardAppearance,
    texture: CardTexture,
}

impl Card {
    /// Card resting at its sphere home with identity orientation.
    #[must_use]
    pub fn new(
        id: ArticleId,
        sphere_position: Vec3,
        grid_position: Vec3,
        texture: CardTexture,
    ) -> Self {
        Self {
            id,
            sphere_position,
            grid_position,
            transform: CardTransform {
                position: sphere_position,
                orientation: Quat::IDENTITY,
            },
            appearance: CardAppearance::default(),
            texture,
        }
    }

    /// Article this card displays.
    #[must_use]
    pub fn id(&self) -> ArticleId {
        self.id
    }

    /// Home position on the sphere; fixed for the card's lifetime.
    #[must_use]
    pub fn sphere_position(&self) -> Vec3 {
        self.sphere_position
    }

    /// Bound texture.
    #[must_use]
    pub fn texture(&self) -> &CardTexture {
        &self.texture
    }
}

/// Ordered card collection with id lookup.
///
/// Order is article order and fixes each card's sphere and grid slot.
#[derive(Debug, Clone, Default)]
pub struct CardSet {
    cards: Vec<Card>,
    index: FxHashMap<ArticleId, usize>,
}

impl CardSet {
    /// Lay out textured cards in the given order.
    ///
    /// A repeated id keeps its first card; later duplicates are dropped.
    #[must_use]
    pub fn build(
        textured: Vec<(ArticleId, CardTexture)>,
        layout: &LayoutOptions,
    ) -> Self {
        let mut seen = rustc_hash::FxHashSet::default();
        let unique: Vec<_> = textured
            .into_iter()
            .filter(|(id, _)| {
                let fresh = seen.insert(*id);
                if !fresh {
                    log::warn!("Dropping duplicate card for article {id}");
                }
                fresh
            })
            .collect();

        let count = unique.len();
        let grid = GridLayout::from_options(count, layout);
        let cards = unique
            .into_iter()
            .enumerate()
            .map(|(i, (id, texture))| {
                Card::new(
                    id,
                    sphere_position(i, count, layout.sphere_radius),
                    grid.position(i).unwrap_or(Vec3::ZERO),
                    texture,
                )
            })
            .collect();
        Self::from_cards(cards)
    }

    fn from_cards(cards: Vec<Card>) -> Self {
        let index = cards
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();
        Self { cards, index }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether there are no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Position of `id` in article order.
    #[must_use]
    pub fn index_of(&self, id: ArticleId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Whether a card exists for `id`.
    #[must_use]
    pub fn contains(&self, id: ArticleId) -> bool {
        self.index.contains_key(&id)
    }

    /// Card for `id`.
    #[must_use]
    pub fn get(&self, id: ArticleId) -> Option<&Card> {
        self.index_of(id).map(|i| &self.cards[i])
    }

    /// Mutable card for `id`.
    pub fn get_mut(&mut self, id: ArticleId) -> Option<&mut Card> {
        self.index_of(id).map(|i| &mut self.cards[i])
    }

    /// Cards in article order.
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Mutable cards in article order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Card> {
        self.cards.iter_mut()
    }

    /// Snapshot of every card's current transform.
    #[must_use]
    pub fn transforms(&self) -> Vec<CardTransform> {
        self.cards.iter().map(|c| c.transform).collect()
    }

    /// Recompute grid cells for the current card count.
    pub fn relayout_grid(&mut self, layout: &LayoutOptions) {
        let grid = GridLayout::from_options(self.cards.len(), layout);
        for (i, card) in self.cards.iter_mut().enumerate() {
            card.grid_position = grid.position(i).unwrap_or(Vec3::ZERO);
        }
    }
}

impl<'a> IntoIterator for &'a CardSet {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use image::RgbaImage;

    use super::*;

    pub(crate) fn blank_texture() -> CardTexture {
        CardTexture::new(RgbaImage::new(4, 3), true)
    }

    pub(crate) fn card_set(count: u32) -> CardSet {
        let textured = (1..=count)
            .map(|i| (ArticleId(i), blank_texture()))
            .collect();
        CardSet::build(textured, &LayoutOptions::default())
    }

    #[test]
    fn cards_start_at_sphere_home() {
        let set = card_set(5);
        assert_eq!(set.len(), 5);
        for card in &set {
            assert_eq!(card.transform.position, card.sphere_position());
            assert_eq!(card.transform.orientation, Quat::IDENTITY);
            assert!((card.sphere_position().length() - 8.0).abs() < 1e-4);
        }
    }

    #[test]
    fn lookup_by_id() {
        let set = card_set(4);
        assert_eq!(set.index_of(ArticleId(3)), Some(2));
        assert_eq!(set.get(ArticleId(3)).map(Card::id), Some(ArticleId(3)));
        assert!(set.get(ArticleId(99)).is_none());
        assert!(!set.contains(ArticleId(0)));
    }

    #[test]
    fn grid_positions_follow_layout() {
        let set = card_set(12);
        let first = set.get(ArticleId(1)).unwrap().grid_position;
        let last = set.get(ArticleId(12)).unwrap().grid_position;
        assert!((first - Vec3::new(-4.5, 2.4, 0.0)).length() < 1e-5);
        assert!((last - Vec3::new(4.5, -2.4, 0.0)).length() < 1e-5);
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let textured = vec![
            (ArticleId(1), blank_texture()),
            (ArticleId(2), blank_texture()),
            (ArticleId(1), blank_texture()),
        ];
        let set = CardSet::build(textured, &LayoutOptions::default());
        assert_eq!(set.len(), 2);
        assert_eq!(set.index_of(ArticleId(2)), Some(1));
    }

    #[test]
    fn empty_set() {
        let set = CardSet::build(Vec::new(), &LayoutOptions::default());
        assert!(set.is_empty());
        assert!(set.transforms().is_empty());
    }
}
