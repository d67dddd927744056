//! Application router configuration.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, post, put},
};

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_categories_panel, get_edit_category_panel, select_category_endpoint,
        update_category_endpoint,
    },
    endpoints,
    not_found::get_404_not_found,
    product::{
        create_product_endpoint, delete_product_endpoint, get_edit_product_panel,
        get_products_page, get_products_panel, get_products_table, update_product_endpoint,
    },
    session::session_middleware,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::PRODUCTS_VIEW, get(get_products_page))
        .route(endpoints::PRODUCTS_PANEL, get(get_products_panel))
        .route(endpoints::PRODUCTS_TABLE, get(get_products_table))
        .route(endpoints::EDIT_PRODUCT_VIEW, get(get_edit_product_panel))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::CATEGORIES_PANEL, get(get_categories_panel))
        .route(endpoints::SELECT_CATEGORY, post(select_category_endpoint))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_panel));

    let api_routes = Router::new()
        .route(endpoints::POST_PRODUCT, post(create_product_endpoint))
        .route(endpoints::PUT_PRODUCT, put(update_product_endpoint))
        .route(endpoints::DELETE_PRODUCT, delete(delete_product_endpoint))
        .route(endpoints::POST_CATEGORY, post(create_category_endpoint))
        .route(endpoints::PUT_CATEGORY, put(update_category_endpoint))
        .route(endpoints::DELETE_CATEGORY, delete(delete_category_endpoint));

    page_routes
        .merge(api_routes)
        .route_layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            session_middleware,
        ))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the products page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::PRODUCTS_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;
    use scraper::Html;

    use crate::{
        AppState, PaginationConfig,
        category::{Category, CategoryName},
        endpoints,
        session::SESSION_COOKIE,
        test_utils::{FakeCatalog, product, texts},
    };

    use super::build_router;

    fn server() -> TestServer {
        let catalog = FakeCatalog::with_data(
            vec![Category {
                id: 1,
                name: CategoryName::new_unchecked("Fruits"),
            }],
            vec![product(1, "Apple", 10.0, 1), product(2, "Banana", 5.0, 1)],
        );
        let app = build_router(AppState::new(catalog, PaginationConfig::default()));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    /// Open the products page as a new browser and return its session cookie.
    async fn open_products_page(server: &TestServer) -> Cookie<'static> {
        let response = server.get(endpoints::PRODUCTS_VIEW).await;
        response.assert_status_ok();

        response.cookie(SESSION_COOKIE)
    }

    async fn visible_products(server: &TestServer, cookie: &Cookie<'static>) -> Vec<String> {
        let response = server
            .get(endpoints::PRODUCTS_PANEL)
            .add_cookie(cookie.clone())
            .await;
        response.assert_status_ok();

        texts(
            &Html::parse_fragment(&response.text()),
            "tbody tr td:first-child",
        )
    }

    #[tokio::test]
    async fn products_page_lists_products() {
        let server = server();

        let response = server.get(endpoints::PRODUCTS_VIEW).await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("Apple"));
        assert!(text.contains("Banana"));
        assert!(text.contains("10.00 €"));
    }

    #[tokio::test]
    async fn created_product_appears_without_refetch() {
        let server = server();
        let cookie = open_products_page(&server).await;

        server
            .post(endpoints::POST_PRODUCT)
            .add_cookie(cookie.clone())
            .form(&[
                ("name", "Cherry"),
                ("description", "Rouge"),
                ("price", "2.5"),
                ("category_id", "1"),
            ])
            .await
            .assert_status_ok();

        assert_eq!(
            visible_products(&server, &cookie).await,
            ["Cherry", "Banana", "Apple"]
        );
    }

    #[tokio::test]
    async fn browsers_do_not_share_list_state() {
        let server = server();
        let alice = open_products_page(&server).await;
        let bob = open_products_page(&server).await;
        assert_ne!(alice.value(), bob.value());

        server
            .get(endpoints::PRODUCTS_TABLE)
            .add_cookie(alice.clone())
            .add_query_param("search", "app")
            .await
            .assert_status_ok();

        assert_eq!(visible_products(&server, &alice).await, ["Apple"]);
        assert_eq!(visible_products(&server, &bob).await, ["Banana", "Apple"]);
    }

    #[tokio::test]
    async fn another_browser_opening_the_page_keeps_my_view() {
        let server = server();
        let alice = open_products_page(&server).await;
        server
            .get(endpoints::PRODUCTS_TABLE)
            .add_cookie(alice.clone())
            .add_query_param("sort", "name")
            .await
            .assert_status_ok();

        open_products_page(&server).await;

        assert_eq!(visible_products(&server, &alice).await, ["Apple", "Banana"]);
    }

    #[tokio::test]
    async fn unconfirmed_delete_returns_no_content() {
        let server = server();
        let response = server.get(endpoints::CATEGORIES_VIEW).await;
        response.assert_status_ok();
        let cookie = response.cookie(SESSION_COOKIE);

        let response = server
            .delete(&endpoints::format_endpoint(endpoints::DELETE_CATEGORY, 1))
            .add_cookie(cookie)
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = server();

        let response = server.get("/nope").await;

        response.assert_status_not_found();
    }
}
