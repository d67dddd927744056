#![allow(missing_docs)]

pub(crate) mod catalog;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use catalog::{FakeCatalog, mounted_session, product};
pub(crate) use form::{
    assert_form_target, find_form, form_error, input_value, required_input, submit_label,
};
pub(crate) use html::{parse_fragment, parse_page, select_one, text_of, texts};
pub(crate) use http::{assert_content_type, assert_status_ok};
