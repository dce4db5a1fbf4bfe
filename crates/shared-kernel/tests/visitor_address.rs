// crates/shared-kernel/tests/visitor_address.rs
use visit_counter_shared_kernel::VisitorAddress;

#[test]
fn construction_trims_whitespace() {
    let address = VisitorAddress::new("  203.0.113.9\n");
    assert_eq!(address.as_str(), "203.0.113.9");
}

#[test]
fn parse_rejects_blank_input() {
    assert!(VisitorAddress::parse("").is_none());
    assert!(VisitorAddress::parse("   ").is_none());
    assert_eq!(VisitorAddress::parse("::1").map(VisitorAddress::into_inner), Some("::1".to_string()));
}
