/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

use boe_codec::{Cursor, Decoder, Encoder};
use boe_core::{
    CancelOrder, Capacity, CrossAllocation, CrossPrioritization, CrossType, DecodeError,
    EncodeError, LoginRequest, Message, NewOrder, NewOrderCross, OrdType, Price, Side,
    TimeInForce,
};
use proptest::prelude::*;

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Buy),
        Just(Side::Sell),
        Just(Side::SellShort),
        Just(Side::SellShortExempt),
    ]
}

fn capacity() -> impl Strategy<Value = Capacity> {
    prop_oneof![
        Just(Capacity::BrokerDealer),
        Just(Capacity::Customer),
        Just(Capacity::Firm),
        Just(Capacity::MarketMaker),
        Just(Capacity::ProfessionalCustomer),
    ]
}

fn allocation() -> impl Strategy<Value = CrossAllocation> {
    (
        side(),
        any::<u32>(),
        "[A-Z0-9-]{0,20}",
        capacity(),
        "[A-Z]{0,4}",
        "[A-Z0-9]{0,4}",
    )
        .prop_map(
            |(side, alloc_qty, cl_ord_id, capacity, clearing_firm, clearing_account)| {
                CrossAllocation {
                    side,
                    alloc_qty,
                    cl_ord_id,
                    capacity,
                    clearing_firm,
                    clearing_account,
                }
            },
        )
}

fn new_order_cross() -> impl Strategy<Value = Message> {
    (
        "[A-Z0-9]{0,20}",
        prop_oneof![
            Just(CrossType::Aim),
            Just(CrossType::Qcc),
            Just(CrossType::Solicitation)
        ],
        prop_oneof![
            Just(CrossPrioritization::NoPriority),
            Just(CrossPrioritization::Buy),
            Just(CrossPrioritization::Sell)
        ],
        "[A-Z]{1,8}",
        any::<i64>(),
        any::<u32>(),
        prop::collection::vec(allocation(), 0..8),
    )
        .prop_map(
            |(cross_id, cross_type, cross_prioritization, symbol, mantissa, order_qty, allocations)| {
                Message::from(NewOrderCross {
                    cross_id,
                    cross_type,
                    cross_prioritization,
                    symbol,
                    price: Price::from_mantissa(mantissa),
                    order_qty,
                    allocations,
                })
            },
        )
}

fn new_order() -> impl Strategy<Value = Message> {
    (
        "[A-Za-z0-9]{1,20}",
        side(),
        any::<u32>(),
        any::<i64>(),
        "[A-Z]{1,8}",
        prop_oneof![Just(OrdType::Market), Just(OrdType::Limit)],
        prop_oneof![
            Just(TimeInForce::Day),
            Just(TimeInForce::Gtc),
            Just(TimeInForce::Ioc)
        ],
        capacity(),
        any::<u32>(),
    )
        .prop_map(
            |(cl_ord_id, side, order_qty, mantissa, symbol, ord_type, time_in_force, capacity, max_floor)| {
                Message::from(NewOrder {
                    cl_ord_id,
                    side,
                    order_qty,
                    price: Price::from_mantissa(mantissa),
                    symbol,
                    ord_type,
                    time_in_force,
                    capacity,
                    max_floor,
                })
            },
        )
}

fn any_message() -> impl Strategy<Value = Message> {
    prop_oneof![
        ("[a-zA-Z0-9]{0,20}", "[a-zA-Z0-9]{0,20}").prop_map(|(username, password)| {
            Message::from(LoginRequest { username, password })
        }),
        new_order_cross(),
        new_order(),
        ("[A-Z0-9]{0,20}", "[A-Z]{0,4}").prop_map(|(orig_cl_ord_id, clearing_firm)| {
            Message::from(CancelOrder {
                orig_cl_ord_id,
                clearing_firm,
            })
        }),
        Just(Message::from(boe_core::ClientHeartbeat)),
    ]
}

proptest! {
    /// Encoding then decoding returns the same message, and re-encoding the
    /// decoded message returns the same bytes.
    #[test]
    fn prop_roundtrip_identity(msg in any_message()) {
        let bytes = Encoder::new().encode_to_vec(&msg).unwrap();
        let mut cursor = Cursor::new(&bytes[..]);
        let decoded = Decoder::new().decode(&mut cursor).unwrap();

        prop_assert_eq!(cursor.position(), bytes.len());
        prop_assert_eq!(&decoded, &msg);
        prop_assert_eq!(Encoder::new().encode_to_vec(&decoded).unwrap(), bytes);
    }

    /// Every strict prefix of a valid message is reported as truncated.
    #[test]
    fn prop_strict_prefix_is_truncated(msg in any_message()) {
        let bytes = Encoder::new().encode_to_vec(&msg).unwrap();
        let mut decoder = Decoder::new();
        for len in 0..bytes.len() {
            let result = decoder.decode_slice(&bytes[..len]);
            prop_assert!(
                matches!(result, Err(DecodeError::TruncatedMessage { .. })),
                "prefix of {} bytes gave {:?}",
                len,
                result
            );
        }
    }

    /// Allocations keep their count and order through a round trip.
    #[test]
    fn prop_group_fidelity(msg in new_order_cross()) {
        let bytes = Encoder::new().encode_to_vec(&msg).unwrap();
        let (Message::NewOrderCross(sent), Message::NewOrderCross(received)) =
            (&msg, Decoder::new().decode_slice(&bytes).unwrap())
        else {
            panic!("message type changed in transit");
        };

        let count_at = 6 + 20 + 1 + 1 + 8 + 8 + 4;
        let count = u16::from_le_bytes([bytes[count_at], bytes[count_at + 1]]);
        prop_assert_eq!(usize::from(count), sent.allocations.len());
        prop_assert_eq!(&received.allocations, &sent.allocations);
    }

    /// Text longer than its field is rejected on encode.
    #[test]
    fn prop_oversized_text_rejected(cl_ord_id in "[A-Z0-9]{21,40}") {
        let msg: Message = CancelOrder {
            orig_cl_ord_id: cl_ord_id.clone(),
            clearing_firm: "CLR".to_string(),
        }
        .into();
        prop_assert_eq!(
            Encoder::new().encode_to_vec(&msg),
            Err(EncodeError::FieldTooLong {
                field: "orig_cl_ord_id",
                length: cl_ord_id.len(),
                max_length: 20,
            })
        );
    }

    /// Message types with no schema fail without consuming field bytes.
    #[test]
    fn prop_unknown_type_rejected(raw_type in 6u16.., body in prop::collection::vec(any::<u8>(), 0..32)) {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&((6 + body.len()) as u32).to_le_bytes());
        bytes.extend_from_slice(&raw_type.to_le_bytes());
        bytes.extend_from_slice(&body);

        let mut cursor = Cursor::new(&bytes[..]);
        prop_assert_eq!(
            Decoder::new().decode(&mut cursor),
            Err(DecodeError::UnknownMessageType(raw_type))
        );
        prop_assert_eq!(cursor.position(), 0);
    }
}

#[test]
fn test_zero_type_is_unknown() {
    let bytes = [6, 0, 0, 0, 0, 0];
    assert_eq!(
        Decoder::new().decode_slice(&bytes),
        Err(DecodeError::UnknownMessageType(0))
    );
}
