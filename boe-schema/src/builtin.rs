/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Built-in BOE message schemas.

use crate::schema::{FieldDef, IntWidth, MessageSchema, TextPad};
use boe_core::{MessageType, Price};

const SPACE: TextPad = TextPad::Right(b' ');

fn price(name: &'static str) -> FieldDef {
    FieldDef::price(name, IntWidth::W8, Price::DEFAULT_SCALE)
}

/// Login Request: `username`, `password`.
#[must_use]
pub fn login_request() -> MessageSchema {
    MessageSchema::new(
        MessageType::LoginRequest,
        "LoginRequest",
        vec![
            FieldDef::text_padded("username", 20, SPACE),
            FieldDef::text_padded("password", 20, SPACE),
        ],
    )
}

/// New Order Cross with its `allocations` repeating group.
#[must_use]
pub fn new_order_cross() -> MessageSchema {
    MessageSchema::new(
        MessageType::NewOrderCross,
        "NewOrderCross",
        vec![
            FieldDef::text("cross_id", 20),
            FieldDef::code("cross_type"),
            FieldDef::code("cross_prioritization"),
            FieldDef::text("symbol", 8),
            price("price"),
            FieldDef::uint("order_qty", IntWidth::W4),
            FieldDef::group(
                "allocations",
                IntWidth::W2,
                vec![
                    FieldDef::code("side"),
                    FieldDef::uint("alloc_qty", IntWidth::W4),
                    FieldDef::text("cl_ord_id", 20),
                    FieldDef::code("capacity"),
                    FieldDef::text("clearing_firm", 4),
                    FieldDef::text_padded("clearing_account", 4, TextPad::Left(b' ')),
                ],
            ),
        ],
    )
}

/// New Order.
#[must_use]
pub fn new_order() -> MessageSchema {
    MessageSchema::new(
        MessageType::NewOrder,
        "NewOrder",
        vec![
            FieldDef::text("cl_ord_id", 20),
            FieldDef::code("side"),
            FieldDef::uint("order_qty", IntWidth::W4),
            price("price"),
            FieldDef::text("symbol", 8),
            FieldDef::code("ord_type"),
            FieldDef::code("time_in_force"),
            FieldDef::code("capacity"),
            FieldDef::uint("max_floor", IntWidth::W4),
        ],
    )
}

/// Cancel Order.
#[must_use]
pub fn cancel_order() -> MessageSchema {
    MessageSchema::new(
        MessageType::CancelOrder,
        "CancelOrder",
        vec![
            FieldDef::text("orig_cl_ord_id", 20),
            FieldDef::text("clearing_firm", 4),
        ],
    )
}

/// Client Heartbeat: no body.
#[must_use]
pub fn client_heartbeat() -> MessageSchema {
    MessageSchema::new(MessageType::ClientHeartbeat, "ClientHeartbeat", Vec::new())
}

/// Returns every built-in schema.
#[must_use]
pub fn schemas() -> Vec<MessageSchema> {
    vec![
        login_request(),
        new_order_cross(),
        new_order(),
        cancel_order(),
        client_heartbeat(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    #[test]
    fn test_login_request_is_46_bytes() {
        let schema = login_request();
        assert!(schema.is_fixed_size());
        assert_eq!(schema.min_len(), 46);
    }

    #[test]
    fn test_fixed_sizes() {
        assert_eq!(new_order().min_len(), 6 + 20 + 1 + 4 + 8 + 8 + 1 + 1 + 1 + 4);
        assert_eq!(cancel_order().min_len(), 30);
        assert_eq!(client_heartbeat().min_len(), 6);
    }

    #[test]
    fn test_cross_group_layout() {
        let schema = new_order_cross();
        assert!(!schema.is_fixed_size());
        assert_eq!(schema.min_len(), 6 + 20 + 1 + 1 + 8 + 8 + 4 + 2);

        let Some(FieldDef {
            kind: FieldKind::Group { count, fields },
            ..
        }) = schema.field("allocations")
        else {
            panic!("allocations is not a group");
        };
        assert_eq!(*count, IntWidth::W2);
        assert_eq!(fields.len(), 6);
        assert_eq!(
            fields[5].kind,
            FieldKind::Text {
                width: 4,
                pad: TextPad::Left(b' ')
            }
        );
    }

    #[test]
    fn test_schema_names_match_types() {
        for schema in schemas() {
            assert_eq!(schema.name, schema.message_type.name());
        }
    }
}
