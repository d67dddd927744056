//! This modules defines the common functionality for paging data.

use std::ops::RangeInclusive;

use maud::{Markup, html};

use crate::view_model::DEFAULT_PAGE_SIZE;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The number of items to display per page.
    pub page_size: usize,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: 5,
        }
    }
}

/// One entry in the row of page links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageLink {
    Previous(usize),
    Page(usize),
    Current(usize),
    Gap,
    Next(usize),
}

/// The pages shown around `current`: at most `max_pages` of them, shifted
/// so the window never runs past either end.
fn page_window(current: usize, page_count: usize, max_pages: usize) -> RangeInclusive<usize> {
    let width = max_pages.min(page_count);
    let start = current
        .saturating_sub(width / 2)
        .max(1)
        .min(page_count + 1 - width);

    start..=start + width - 1
}

/// The links for page `current` of `page_count`.
///
/// The first and last pages are always reachable. A gap marks skipped pages.
fn page_links(current: usize, page_count: usize, max_pages: usize) -> Vec<PageLink> {
    let window = page_window(current, page_count, max_pages);
    let (first, last) = (*window.start(), *window.end());
    let mut links = Vec::new();

    if current > 1 {
        links.push(PageLink::Previous(current - 1));
    }

    if first > 1 {
        links.push(PageLink::Page(1));
        if first > 2 {
            links.push(PageLink::Gap);
        }
    }

    links.extend(window.map(|page| {
        if page == current {
            PageLink::Current(page)
        } else {
            PageLink::Page(page)
        }
    }));

    if last < page_count {
        if last + 1 < page_count {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Page(page_count));
    }

    if current < page_count {
        links.push(PageLink::Next(current + 1));
    }

    links
}

/// Render the page links for a list.
///
/// Each link asks for `page_url(page)` and swaps the response into `target`.
/// Nothing is rendered when there is at most one page.
pub fn pagination_view(
    curr_page: usize,
    page_count: usize,
    max_pages: usize,
    target: &str,
    page_url: impl Fn(usize) -> String,
) -> Markup {
    if page_count <= 1 {
        return html! {};
    }

    let links = page_links(curr_page, page_count, max_pages);
    let link_style = "block px-3 py-2 rounded bg-gray-200 text-gray-900 \
        hover:bg-gray-300 dark:bg-gray-700 dark:text-white";

    html! {
        nav class="pagination flex justify-center mt-4" aria-label="Pagination"
        {
            ul class="flex items-center space-x-2"
            {
                @for link in links {
                    li
                    {
                        @match link {
                            PageLink::Current(page) => {
                                span
                                    aria-current="page"
                                    class="block px-3 py-2 rounded bg-blue-500 text-white"
                                { (page) }
                            }
                            PageLink::Gap => {
                                span class="px-3 py-2" { "..." }
                            }
                            PageLink::Previous(page)
                            | PageLink::Page(page)
                            | PageLink::Next(page) => {
                                a
                                    href="#"
                                    hx-get=(page_url(page))
                                    hx-target=(target)
                                    hx-swap="outerHTML"
                                    class=(link_style)
                                {
                                    @match link {
                                        PageLink::Previous(_) => { "Précédent" }
                                        PageLink::Next(_) => { "Suivant" }
                                        _ => { (page) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
