//! The list view-model: an authoritative collection plus the view state used
//! to derive the visible slice from it.
//!
//! Derivations are recomputed from scratch on every call. The collection is
//! only ever changed through the mutation methods, each of which returns the
//! view to the first page.

use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// The number of entities shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// An entity that can be shown in a list page.
pub trait Listable {
    /// The type of the entity's service-assigned identifier.
    type Id: Copy + Eq + Display;

    /// The entity's identifier.
    fn id(&self) -> Self::Id;

    /// The name used for searching and sorting by name.
    fn name(&self) -> &str;

    /// The price used for sorting by price, if the entity has one.
    fn price(&self) -> Option<f64> {
        None
    }
}

/// The field a list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Numeric ascending order by price.
    #[default]
    Price,
    /// Lexicographic ascending order by name.
    Name,
}

impl SortKey {
    /// The value used for this key in query strings.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Name => "name",
        }
    }

    /// The label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Price => "Prix",
            SortKey::Name => "Nom",
        }
    }

    fn compare<T: Listable>(self, a: &T, b: &T) -> Ordering {
        match self {
            SortKey::Price => match (a.price(), b.price()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => Ordering::Equal,
            },
            SortKey::Name => collation_key(a.name())
                .cmp(&collation_key(b.name()))
                .then_with(|| a.name().cmp(b.name())),
        }
    }
}

/// Fold `name` to the form used to order names: accents stripped and
/// lowercased, so "Éclair" sorts between "banane" and "Zucchini".
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Get the entities whose name contains `search_term`, ignoring case, in
/// their original order.
///
/// An empty search term matches everything.
pub fn filter_by_name<'a, T: Listable>(items: &'a [T], search_term: &str) -> Vec<&'a T> {
    let needle = search_term.to_lowercase();

    items
        .iter()
        .filter(|item| item.name().to_lowercase().contains(&needle))
        .collect()
}

/// Order `items` by `sort_key`. Entities that compare equal keep their order.
pub fn sort_by_key<T: Listable>(mut items: Vec<&T>, sort_key: SortKey) -> Vec<&T> {
    items.sort_by(|a, b| sort_key.compare(*a, *b));
    items
}

/// Get the window of `items` shown on page `page` (starting from 1).
///
/// Pages past the end are empty.
pub fn page_slice<'s, 'a, T>(items: &'s [&'a T], page: usize, page_size: usize) -> &'s [&'a T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let start = start.min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    &items[start..end]
}

/// The number of pages needed to show `item_count` entities.
pub fn page_count(item_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }

    item_count.div_ceil(page_size)
}

/// A collection of entities and the search, sort and page state of the list
/// that shows them.
#[derive(Debug, Clone)]
pub struct ListViewModel<T> {
    items: Vec<T>,
    search_term: String,
    sort_key: SortKey,
    current_page: usize,
    page_size: usize,
}

impl<T: Listable> ListViewModel<T> {
    /// Create an empty list showing `page_size` entities per page.
    ///
    /// A `page_size` of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            search_term: String::new(),
            sort_key: SortKey::default(),
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// The authoritative collection, in the order it was received.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Find the entity with `id`.
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// The current search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The current sort key.
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// The current page, starting from 1.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The maximum number of entities on a page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the whole collection, e.g., after fetching it.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 1;
    }

    /// Add an entity to the end of the collection.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.current_page = 1;
    }

    /// Replace the entity that has the same ID as `item`.
    ///
    /// Returns `false`, and leaves the collection as it was, if there is no
    /// such entity.
    pub fn replace(&mut self, item: T) -> bool {
        let id = item.id();

        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(existing) => {
                *existing = item;
                self.current_page = 1;
                true
            }
            None => false,
        }
    }

    /// Remove the entity with `id`, returning it if it was present.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        self.current_page = 1;

        Some(self.items.remove(index))
    }

    /// Keep only the entities for which `keep` returns true.
    ///
    /// Returns the number of entities removed.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(keep);
        let removed = before - self.items.len();

        if removed > 0 {
            self.current_page = 1;
        }

        removed
    }

    /// Change the search term and go back to the first page.
    pub fn set_search_term(&mut self, search_term: &str) {
        search_term.clone_into(&mut self.search_term);
        self.current_page = 1;
    }

    /// Change the sort key, staying on the current page.
    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
    }

    /// Go to `page`, clamped to the pages that exist.
    ///
    /// An empty list has a single, empty page.
    pub fn set_page(&mut self, page: usize) {
        let last_page = self.total_pages().max(1);
        self.current_page = page.clamp(1, last_page);
    }

    /// The entities matching the search term, in collection order.
    pub fn filtered(&self) -> Vec<&T> {
        filter_by_name(&self.items, &self.search_term)
    }

    /// The filtered entities ordered by the sort key.
    pub fn sorted(&self) -> Vec<&T> {
        sort_by_key(self.filtered(), self.sort_key)
    }

    /// The sorted entities on the current page.
    pub fn paginated(&self) -> Vec<&T> {
        let sorted = self.sorted();

        page_slice(&sorted, self.current_page, self.page_size).to_vec()
    }

    /// The number of pages of sorted entities.
    pub fn total_pages(&self) -> usize {
        page_count(self.filtered().len(), self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_PAGE_SIZE, ListViewModel, Listable, SortKey, filter_by_name, page_count,
        page_slice, sort_by_key,
    };

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        name: &'static str,
        price: f64,
    }

    impl Listable for Item {
        type Id = i64;

        fn id(&self) -> i64 {
            self.id
        }

        fn name(&self) -> &str {
            self.name
        }

        fn price(&self) -> Option<f64> {
            Some(self.price)
        }
    }

    fn item(id: i64, name: &'static str, price: f64) -> Item {
        Item { id, name, price }
    }

    fn fruit() -> Vec<Item> {
        vec![item(1, "Apple", 10.0), item(2, "Banana", 5.0)]
    }

    fn numbered(count: i64) -> Vec<Item> {
        (1..=count).map(|i| item(i, "Item", i as f64)).collect()
    }

    fn ids(items: &[&Item]) -> Vec<i64> {
        items.iter().map(|item| item.id).collect()
    }

    fn view_model(items: Vec<Item>) -> ListViewModel<Item> {
        let mut view_model = ListViewModel::new(DEFAULT_PAGE_SIZE);
        view_model.set_items(items);
        view_model
    }

    #[test]
    fn sorts_by_price_ascending() {
        let view_model = view_model(fruit());

        let got = view_model.sorted();

        assert_eq!(ids(&got), [2, 1]);
    }

    #[test]
    fn sorts_by_name_ascending() {
        let items = vec![item(1, "Cherry", 1.0), item(2, "Apple", 3.0), item(3, "Banana", 2.0)];

        let got = sort_by_key(items.iter().collect(), SortKey::Name);

        assert_eq!(ids(&got), [2, 3, 1]);
    }

    #[test]
    fn name_sort_ignores_case_and_accents() {
        let items = vec![
            item(1, "Zucchini", 1.0),
            item(2, "banane", 1.0),
            item(3, "Éclair", 1.0),
            item(4, "Abricot", 1.0),
        ];

        let got = sort_by_key(items.iter().collect(), SortKey::Name);

        let names: Vec<_> = got.iter().map(|item| item.name).collect();
        assert_eq!(names, ["Abricot", "banane", "Éclair", "Zucchini"]);
    }

    #[test]
    fn sort_keeps_order_of_equal_prices() {
        let items = vec![item(1, "B", 2.0), item(2, "A", 1.0), item(3, "C", 2.0)];

        let got = sort_by_key(items.iter().collect(), SortKey::Price);

        assert_eq!(ids(&got), [2, 1, 3]);
    }

    #[test]
    fn filters_case_insensitively() {
        let items = fruit();

        let got = filter_by_name(&items, "ap");

        assert_eq!(got, [&items[0]]);
    }

    #[test]
    fn empty_search_matches_everything() {
        let items = fruit();

        let got = filter_by_name(&items, "");

        assert_eq!(ids(&got), [1, 2]);
    }

    #[test]
    fn filter_is_a_subsequence() {
        let items = vec![
            item(1, "Pineapple", 1.0),
            item(2, "Banana", 1.0),
            item(3, "APPLE pie", 1.0),
            item(4, "Grape", 1.0),
        ];

        let got = filter_by_name(&items, "aPp");

        assert_eq!(ids(&got), [1, 3]);
    }

    #[test]
    fn page_slice_lengths() {
        let items = numbered(12);
        let refs = items.iter().collect::<Vec<_>>();

        for page in 1..=4 {
            let want_len = 5usize.min(12usize.saturating_sub(5 * (page - 1)));
            let got = page_slice(&refs, page, 5);

            assert_eq!(got.len(), want_len, "page {page}");
            assert_eq!(got, &refs[(5 * (page - 1)).min(12)..(5 * page).min(12)]);
        }
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 5), 0);
        assert_eq!(page_count(5, 5), 1);
        assert_eq!(page_count(6, 5), 2);
        assert_eq!(page_count(11, 5), 3);
    }

    #[test]
    fn paginated_is_window_of_sorted() {
        let mut view_model = view_model(numbered(7));
        view_model.set_sort_key(SortKey::Price);

        view_model.set_page(2);

        assert_eq!(ids(&view_model.paginated()), [6, 7]);
        assert_eq!(view_model.total_pages(), 2);
    }

    #[test]
    fn changing_search_term_resets_page() {
        let mut view_model = view_model(numbered(12));
        view_model.set_page(3);
        assert_eq!(view_model.current_page(), 3);

        view_model.set_search_term("item");

        assert_eq!(view_model.current_page(), 1);
    }

    #[test]
    fn changing_collection_resets_page() {
        let mut view_model = view_model(numbered(12));

        view_model.set_page(3);
        view_model.push(item(13, "New", 0.5));
        assert_eq!(view_model.current_page(), 1);

        view_model.set_page(3);
        assert!(view_model.replace(item(13, "Renamed", 0.5)));
        assert_eq!(view_model.current_page(), 1);

        view_model.set_page(3);
        assert!(view_model.remove(13).is_some());
        assert_eq!(view_model.current_page(), 1);
    }

    #[test]
    fn changing_sort_key_keeps_page() {
        let mut view_model = view_model(numbered(12));
        view_model.set_page(2);

        view_model.set_sort_key(SortKey::Name);

        assert_eq!(view_model.current_page(), 2);
    }

    #[test]
    fn page_is_clamped() {
        let mut view_model = view_model(numbered(6));

        view_model.set_page(0);
        assert_eq!(view_model.current_page(), 1);

        view_model.set_page(99);
        assert_eq!(view_model.current_page(), 2);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let mut view_model = view_model(Vec::new());

        view_model.set_page(4);

        assert_eq!(view_model.current_page(), 1);
        assert!(view_model.paginated().is_empty());
        assert_eq!(view_model.total_pages(), 0);
    }

    #[test]
    fn filter_shorter_than_page_does_not_leave_empty_page() {
        let mut view_model = view_model(vec![
            item(1, "Apple", 1.0),
            item(2, "Apricot", 2.0),
            item(3, "Banana", 3.0),
            item(4, "Blueberry", 4.0),
            item(5, "Cherry", 5.0),
            item(6, "Date", 6.0),
        ]);
        view_model.set_page(2);

        view_model.set_search_term("ap");

        assert_eq!(ids(&view_model.paginated()), [1, 2]);
    }

    #[test]
    fn mutations_leave_other_entities_untouched() {
        let mut view_model = view_model(fruit());

        assert!(!view_model.replace(item(9, "Ghost", 0.0)));
        assert_eq!(view_model.remove(9), None);
        assert_eq!(view_model.items(), fruit().as_slice());
    }

    #[test]
    fn retain_counts_removed_entities() {
        let mut view_model = view_model(numbered(5));

        let removed = view_model.retain(|item| item.id % 2 == 0);

        assert_eq!(removed, 3);
        assert_eq!(
            view_model.items().iter().map(|item| item.id).collect::<Vec<_>>(),
            [2, 4]
        );
    }

    #[test]
    fn derivations_do_not_mutate_collection() {
        let mut view_model = view_model(fruit());
        view_model.set_search_term("an");
        view_model.set_sort_key(SortKey::Name);

        let _ = view_model.paginated();

        assert_eq!(view_model.items(), fruit().as_slice());
    }
}
