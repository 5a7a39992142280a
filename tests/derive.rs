#![allow(dead_code)]

use tobin_bas::{Columns, Text};
use zerocopy::FromBytes;

#[repr(C)]
#[derive(Debug, FromBytes, Columns)]
struct Lot {
    #[column("LotNumber")]
    number: Text<4>,
    _reserved: [u8; 1],
    #[column(flatten)]
    owner: Owner,
    #[column("Acres")]
    acres: Text<6>,
}

#[repr(C)]
#[derive(Debug, FromBytes, Columns)]
struct Owner {
    #[column("OwnerName")]
    name: Text<10>,
    #[column("OwnerCode")]
    code: Text<2>,
}

fn lot() -> Lot {
    zerocopy::transmute!(*b"0012-SMITH     07 40.25")
}

#[test]
fn columns_follow_declaration_order() {
    let mut names = vec![];
    lot().visit_columns(&mut |name, _| names.push(name));

    assert_eq!(names, ["LotNumber", "OwnerName", "OwnerCode", "Acres"]);
}

#[test]
fn columns_keep_raw_text() {
    let columns = lot().columns();

    assert_eq!(columns.len(), 4);
    assert_eq!(columns["LotNumber"], "0012");
    assert_eq!(columns["OwnerName"], "SMITH     ");
    assert_eq!(columns["OwnerCode"], "07");
    assert_eq!(columns["Acres"], " 40.25");
}

#[test]
fn columns_are_visited_as_display() {
    let mut rendered = String::new();
    lot().visit_columns(&mut |name, value| {
        rendered.push_str(&format!("{name}=[{value}];"));
    });

    assert_eq!(
        rendered,
        "LotNumber=[0012];OwnerName=[SMITH     ];OwnerCode=[07];Acres=[ 40.25];"
    );
}
