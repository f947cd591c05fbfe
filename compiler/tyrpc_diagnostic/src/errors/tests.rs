#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_get_existing_doc() {
    let doc = ErrorDocs::get(ErrorCode::E1001);
    assert!(doc.is_some());
    assert!(doc.unwrap().contains("Unsupported Scalar"));
}

/// Every code is documented exactly once, and each doc is titled with its code.
#[test]
fn test_docs_cover_all_codes() {
    assert_eq!(DOCS.len(), ErrorCode::ALL.len());
    for &code in ErrorCode::ALL {
        let doc = ErrorDocs::get(code);
        assert!(doc.is_some(), "{code} has no documentation");
        assert!(doc.unwrap().starts_with(&format!("# {code}:")));
    }
}
