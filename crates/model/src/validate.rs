//! Request Validation
//!
//! Raw requests arrive from the request layer as loosely-typed JSON
//! objects, the same shape the eventual HTTP handlers receive. Each
//! validator here is a pure function of its input: it produces either a
//! fully-typed value or the list of *every* field-level violation found,
//! in a stable field order, so a caller can route each message to the
//! widget responsible for it. No validator reads catalog or ledger state.

use crate::error::{ErrorKind, Errors, FieldError, Result};
use crate::models::{Book, Isbn, Lend, PatronId};
use biblio_index::{MIN_WORD_LEN, tokenize};
use serde_json::{Map, Value};
use time::UtcDateTime;

/// Earliest accepted publication year.
pub const MIN_PUBLICATION_YEAR: u16 = 1448;

/// A validated `find` request: normalized search words plus the optional
/// slice parameters. Defaults for `index` and `count` are applied by the
/// facade, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindRequest {
    pub words: Vec<String>,
    pub index: Option<usize>,
    pub count: Option<usize>,
}

/// Validate an add-book request.
///
/// Required fields: `isbn`, `title`, `authors`, `pages`, `year`,
/// `publisher`; optional `nCopies` defaults to 1. Pages and copies must be
/// positive integers, the year must lie in `[1448, current year]`, the
/// ISBN must have the form `ddd-ddd-ddd-d`, and no string field or author
/// name may be empty.
pub fn add_book(req: &Value) -> Result<Book> {
    let obj = object(req)?;
    let mut errors = Vec::new();

    let isbn = match nonempty_str(obj, "isbn", &mut errors) {
        Some(raw) => match raw.parse::<Isbn>() {
            Ok(isbn) => Some(isbn),
            Err(err) => {
                errors.push(FieldError::new(ErrorKind::BadReq, "isbn", format!("property isbn {err}")));
                None
            },
        },
        None => None,
    };
    let title = nonempty_str(obj, "title", &mut errors).map(str::to_string);
    let authors = author_list(obj, &mut errors);
    let pages = positive_int(obj, "pages", Presence::Required, &mut errors)
        .and_then(|n| narrow::<u32>(n, "pages", &mut errors));
    let year = publication_year(obj, &mut errors);
    let publisher = nonempty_str(obj, "publisher", &mut errors).map(str::to_string);
    let n_copies = match positive_int(obj, "nCopies", Presence::Optional, &mut errors) {
        Some(n) => narrow::<u32>(n, "nCopies", &mut errors),
        None if obj.contains_key("nCopies") => None,
        None => Some(1),
    };

    if let Some(errors) = Errors::from_vec(errors) {
        return Err(errors);
    }
    // Every accumulator is Some once the error list is empty.
    Ok(Book {
        isbn: isbn.unwrap(),
        title: title.unwrap(),
        authors: authors.unwrap(),
        pages: pages.unwrap(),
        year: year.unwrap(),
        publisher: publisher.unwrap(),
        n_copies: n_copies.unwrap(),
    })
}

/// Validate a find-books request.
///
/// Requires a string `search` that yields at least one word of
/// [`MIN_WORD_LEN`] or more characters under the index's tokenization
/// rule. Optional `index` and `count` must be non-negative integers.
pub fn find_books(req: &Value) -> Result<FindRequest> {
    let obj = object(req)?;
    let mut errors = Vec::new();

    let words = match required_str(obj, "search", &mut errors) {
        Some(search) => {
            let words = tokenize(search);
            if words.is_empty() {
                errors.push(FieldError::new(
                    ErrorKind::BadReq,
                    "search",
                    format!("property search must contain at least one word of {MIN_WORD_LEN} or more characters"),
                ));
                None
            } else {
                Some(words)
            }
        },
        None => None,
    };
    let index = slice_param(obj, "index", &mut errors);
    let count = slice_param(obj, "count", &mut errors);

    if let Some(errors) = Errors::from_vec(errors) {
        return Err(errors);
    }
    Ok(FindRequest { words: words.unwrap(), index, count })
}

/// Validate a checkout request: string `patronId` and `isbn`.
///
/// The ISBN's shape is deliberately not checked here; an identifier that
/// never entered the catalog fails the checkout as an unknown book.
pub fn checkout_book(req: &Value) -> Result<Lend> {
    lend_request(req)
}

/// Validate a return request: string `patronId` and `isbn`.
pub fn return_book(req: &Value) -> Result<Lend> {
    lend_request(req)
}

fn lend_request(req: &Value) -> Result<Lend> {
    let obj = object(req)?;
    let mut errors = Vec::new();
    let patron_id = required_str(obj, "patronId", &mut errors).map(PatronId::from);
    let isbn = required_str(obj, "isbn", &mut errors).map(Isbn::new);
    if let Some(errors) = Errors::from_vec(errors) {
        return Err(errors);
    }
    Ok(Lend { patron_id: patron_id.unwrap(), isbn: isbn.unwrap() })
}

// =========================================================================
// Field helpers
// =========================================================================

#[derive(PartialEq)]
enum Presence {
    Required,
    Optional,
}

fn object(req: &Value) -> Result<&Map<String, Value>> {
    req.as_object()
        .ok_or_else(|| Errors::of(FieldError::unfielded(ErrorKind::BadType, "request must be a JSON object")))
}

fn required_str<'a>(obj: &'a Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<&'a str> {
    match obj.get(field) {
        None => {
            errors.push(FieldError::missing(field));
            None
        },
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            errors.push(FieldError::new(
                ErrorKind::BadType,
                field,
                format!("property {field} must be a string"),
            ));
            None
        },
    }
}

fn nonempty_str<'a>(obj: &'a Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<&'a str> {
    let value = required_str(obj, field, errors)?;
    if value.trim().is_empty() {
        errors.push(FieldError::new(
            ErrorKind::BadReq,
            field,
            format!("property {field} must not be empty"),
        ));
        return None;
    }
    Some(value)
}

fn author_list(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<Vec<String>> {
    let list = match obj.get("authors") {
        None => {
            errors.push(FieldError::missing("authors"));
            return None;
        },
        Some(Value::Array(list)) => list,
        Some(_) => {
            errors.push(FieldError::new(
                ErrorKind::BadType,
                "authors",
                "property authors must be an array of strings",
            ));
            return None;
        },
    };
    let Some(names) = list.iter().map(|v| v.as_str().map(str::to_string)).collect::<Option<Vec<_>>>() else {
        errors.push(FieldError::new(
            ErrorKind::BadType,
            "authors",
            "property authors must be an array of strings",
        ));
        return None;
    };
    if names.is_empty() {
        errors.push(FieldError::new(ErrorKind::BadReq, "authors", "property authors must not be empty"));
        return None;
    }
    if names.iter().any(|name| name.trim().is_empty()) {
        errors.push(FieldError::new(
            ErrorKind::BadReq,
            "authors",
            "property authors must not contain empty names",
        ));
        return None;
    }
    Some(names)
}

/// Interpret a JSON value as an integer. Some clients serialize whole
/// numbers as floats, so a float with a zero fraction counts.
fn as_integer(value: &Value) -> Option<i64> {
    match value.as_i64() {
        Some(n) => Some(n),
        None => value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(f))
            .map(|f| f as i64),
    }
}

fn positive_int(
    obj: &Map<String, Value>,
    field: &str,
    presence: Presence,
    errors: &mut Vec<FieldError>,
) -> Option<i64> {
    let value = match obj.get(field) {
        None => {
            if presence == Presence::Required {
                errors.push(FieldError::missing(field));
            }
            return None;
        },
        Some(v) => v,
    };
    if !value.is_number() {
        errors.push(FieldError::new(ErrorKind::BadType, field, format!("property {field} must be numeric")));
        return None;
    }
    match as_integer(value) {
        Some(n) if n >= 1 => Some(n),
        _ => {
            errors.push(FieldError::new(
                ErrorKind::BadReq,
                field,
                format!("property {field} must be a positive integer"),
            ));
            None
        },
    }
}

fn narrow<T: TryFrom<i64>>(n: i64, field: &str, errors: &mut Vec<FieldError>) -> Option<T> {
    match T::try_from(n) {
        Ok(narrowed) => Some(narrowed),
        Err(_) => {
            errors.push(FieldError::new(
                ErrorKind::BadReq,
                field,
                format!("property {field} is out of range"),
            ));
            None
        },
    }
}

fn publication_year(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<u16> {
    let year = positive_int(obj, "year", Presence::Required, &mut *errors)?;
    let current = current_year();
    if !(i64::from(MIN_PUBLICATION_YEAR)..=i64::from(current)).contains(&year) {
        errors.push(FieldError::new(
            ErrorKind::BadReq,
            "year",
            format!("property year must be in the range [{MIN_PUBLICATION_YEAR}, {current}]"),
        ));
        return None;
    }
    // In range, so the narrowing cannot fail.
    u16::try_from(year).ok()
}

fn current_year() -> u16 {
    u16::try_from(UtcDateTime::now().year()).unwrap_or(u16::MAX)
}

fn slice_param(obj: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<usize> {
    let value = obj.get(field)?;
    if !value.is_number() {
        errors.push(FieldError::new(ErrorKind::BadType, field, format!("property {field} must be numeric")));
        return None;
    }
    match as_integer(value).and_then(|n| usize::try_from(n).ok()) {
        Some(n) => Some(n),
        None => {
            errors.push(FieldError::new(
                ErrorKind::BadReq,
                field,
                format!("property {field} must be a non-negative integer"),
            ));
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn good_book() -> Value {
        json!({
            "isbn": "123-456-789-0",
            "title": "JavaScript: The Definitive Guide",
            "authors": ["David Flanagan"],
            "pages": 706,
            "year": 2020,
            "publisher": "O'Reilly",
            "nCopies": 2,
        })
    }

    #[test]
    fn test_add_book_accepts_valid_request() {
        let book = add_book(&good_book()).unwrap();
        assert_eq!(book.isbn.as_str(), "123-456-789-0");
        assert_eq!(book.authors, ["David Flanagan"]);
        assert_eq!(book.n_copies, 2);
    }

    #[test]
    fn test_add_book_defaults_copies_to_one() {
        let mut req = good_book();
        req.as_object_mut().unwrap().remove("nCopies");
        assert_eq!(add_book(&req).unwrap().n_copies, 1);
    }

    #[test]
    fn test_add_book_reports_every_missing_field() {
        let errors = add_book(&json!({})).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.clone().unwrap()).collect();
        assert_eq!(fields, ["isbn", "title", "authors", "pages", "year", "publisher"]);
        assert!(errors.iter().all(|e| e.kind == ErrorKind::Missing));
    }

    #[test]
    fn test_add_book_accumulates_mixed_violations() {
        let req = json!({
            "isbn": "123-456-789-0",
            "title": "",
            "authors": [],
            "pages": 0,
            "year": 2020,
            "publisher": true,
        });
        let errors = add_book(&req).unwrap_err();
        let found: Vec<_> =
            errors.iter().map(|e| (e.kind, e.field.clone().unwrap())).collect();
        assert_eq!(
            found,
            [
                (ErrorKind::BadReq, "title".to_string()),
                (ErrorKind::BadReq, "authors".to_string()),
                (ErrorKind::BadReq, "pages".to_string()),
                (ErrorKind::BadType, "publisher".to_string()),
            ]
        );
    }

    #[rstest]
    #[case(json!(12), ErrorKind::BadType)]
    #[case(json!(""), ErrorKind::BadReq)]
    #[case(json!("978-3-16-148410-0"), ErrorKind::BadReq)]
    #[case(json!("1234567890"), ErrorKind::BadReq)]
    fn test_add_book_rejects_bad_isbn(#[case] isbn: Value, #[case] kind: ErrorKind) {
        let mut req = good_book();
        req.as_object_mut().unwrap().insert("isbn".to_string(), isbn);
        let errors = add_book(&req).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().kind, kind);
        assert_eq!(errors.first().field.as_deref(), Some("isbn"));
    }

    #[rstest]
    #[case(json!("David Flanagan"), ErrorKind::BadType)]
    #[case(json!(["David Flanagan", 42]), ErrorKind::BadType)]
    #[case(json!([]), ErrorKind::BadReq)]
    #[case(json!(["David Flanagan", ""]), ErrorKind::BadReq)]
    fn test_add_book_rejects_bad_authors(#[case] authors: Value, #[case] kind: ErrorKind) {
        let mut req = good_book();
        req.as_object_mut().unwrap().insert("authors".to_string(), authors);
        let errors = add_book(&req).unwrap_err();
        assert_eq!(errors.first().kind, kind);
        assert_eq!(errors.first().field.as_deref(), Some("authors"));
    }

    #[rstest]
    #[case(json!("706"), ErrorKind::BadType)]
    #[case(json!(0), ErrorKind::BadReq)]
    #[case(json!(-3), ErrorKind::BadReq)]
    #[case(json!(3.5), ErrorKind::BadReq)]
    fn test_add_book_rejects_bad_pages(#[case] pages: Value, #[case] kind: ErrorKind) {
        let mut req = good_book();
        req.as_object_mut().unwrap().insert("pages".to_string(), pages);
        let errors = add_book(&req).unwrap_err();
        assert_eq!(errors.first().kind, kind);
        assert_eq!(errors.first().field.as_deref(), Some("pages"));
    }

    #[test]
    fn test_add_book_accepts_integral_float() {
        let mut req = good_book();
        req.as_object_mut().unwrap().insert("pages".to_string(), json!(706.0));
        assert_eq!(add_book(&req).unwrap().pages, 706);
    }

    #[rstest]
    #[case(1447)]
    #[case(9999)]
    fn test_add_book_rejects_year_out_of_range(#[case] year: i64) {
        let mut req = good_book();
        req.as_object_mut().unwrap().insert("year".to_string(), json!(year));
        let errors = add_book(&req).unwrap_err();
        assert_eq!(errors.first().kind, ErrorKind::BadReq);
        assert_eq!(errors.first().field.as_deref(), Some("year"));
    }

    #[test]
    fn test_add_book_rejects_zero_copies() {
        let mut req = good_book();
        req.as_object_mut().unwrap().insert("nCopies".to_string(), json!(0));
        let errors = add_book(&req).unwrap_err();
        assert_eq!(errors.first().kind, ErrorKind::BadReq);
        assert_eq!(errors.first().field.as_deref(), Some("nCopies"));
    }

    #[test]
    fn test_add_book_rejects_non_object_request() {
        let errors = add_book(&json!("not an object")).unwrap_err();
        assert_eq!(errors.first().kind, ErrorKind::BadType);
        assert_eq!(errors.first().field, None);
    }

    #[test]
    fn test_find_books_normalizes_words() {
        let found = find_books(&json!({"search": "Definitive JAVASCRIPT"})).unwrap();
        assert_eq!(found.words, ["definitive", "javascript"]);
        assert_eq!(found.index, None);
        assert_eq!(found.count, None);
    }

    #[test]
    fn test_find_books_accepts_slice_params() {
        let found = find_books(&json!({"search": "rust", "index": 5, "count": 10})).unwrap();
        assert_eq!(found.index, Some(5));
        assert_eq!(found.count, Some(10));
    }

    #[rstest]
    #[case(json!({}), ErrorKind::Missing)]
    #[case(json!({"search": 12}), ErrorKind::BadType)]
    #[case(json!({"search": ""}), ErrorKind::BadReq)]
    #[case(json!({"search": "a ! x"}), ErrorKind::BadReq)]
    fn test_find_books_rejects_bad_search(#[case] req: Value, #[case] kind: ErrorKind) {
        let errors = find_books(&req).unwrap_err();
        assert_eq!(errors.first().kind, kind);
        assert_eq!(errors.first().field.as_deref(), Some("search"));
    }

    #[rstest]
    #[case("index", json!("3"), ErrorKind::BadType)]
    #[case("index", json!(-1), ErrorKind::BadReq)]
    #[case("count", json!(2.5), ErrorKind::BadReq)]
    fn test_find_books_rejects_bad_slice_params(
        #[case] field: &str,
        #[case] value: Value,
        #[case] kind: ErrorKind,
    ) {
        let mut req = json!({"search": "rust"});
        req.as_object_mut().unwrap().insert(field.to_string(), value);
        let errors = find_books(&req).unwrap_err();
        assert_eq!(errors.first().kind, kind);
        assert_eq!(errors.first().field.as_deref(), Some(field));
    }

    #[test]
    fn test_checkout_book_accepts_valid_request() {
        let lend = checkout_book(&json!({"patronId": "joe", "isbn": "123-456-789-0"})).unwrap();
        assert_eq!(lend.patron_id.as_str(), "joe");
        assert_eq!(lend.isbn.as_str(), "123-456-789-0");
    }

    #[rstest]
    #[case(json!({"isbn": "123-456-789-0"}), "patronId", ErrorKind::Missing)]
    #[case(json!({"patronId": "joe"}), "isbn", ErrorKind::Missing)]
    #[case(json!({"patronId": 1, "isbn": "123-456-789-0"}), "patronId", ErrorKind::BadType)]
    #[case(json!({"patronId": "joe", "isbn": 1}), "isbn", ErrorKind::BadType)]
    fn test_lend_requests_reject_bad_fields(
        #[case] req: Value,
        #[case] field: &str,
        #[case] kind: ErrorKind,
    ) {
        for validator in [checkout_book as fn(&Value) -> Result<Lend>, return_book] {
            let errors = validator(&req).unwrap_err();
            assert_eq!(errors.first().kind, kind);
            assert_eq!(errors.first().field.as_deref(), Some(field));
        }
    }

    #[test]
    fn test_lend_requests_report_both_missing_fields() {
        let errors = return_book(&json!({})).unwrap_err();
        assert_eq!(errors.len(), 2);
        let fields: Vec<_> = errors.iter().map(|e| e.field.clone().unwrap()).collect();
        assert_eq!(fields, ["patronId", "isbn"]);
    }
}
