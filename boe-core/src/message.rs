/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Typed BOE messages.
//!
//! This module provides:
//! - [`BoeMessage`]: Trait tying a typed message to its schema-ordered record
//! - One struct per supported message type
//! - [`Message`]: Tagged union over every supported message type
//!
//! The field order used by `to_record` and `from_record` must match the
//! registered schema of the message type field for field.

use crate::error::DecodeError;
use crate::field::{FieldValue, Record, RecordReader};
use crate::types::{
    Capacity, CrossPrioritization, CrossType, MessageType, OrdType, Price, Side, TimeInForce,
    WireCode,
};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

/// Trait implemented by every typed BOE message.
pub trait BoeMessage: Sized {
    /// Message type carried in the header.
    const MESSAGE_TYPE: MessageType;

    /// Flattens the message into schema-ordered field values.
    fn to_record(&self) -> Record;

    /// Rebuilds the message from schema-ordered field values.
    ///
    /// # Errors
    /// Returns `DecodeError` if the record does not match the message shape
    /// or holds an unknown enumerated code.
    fn from_record(record: Record) -> Result<Self, DecodeError>;
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

fn code<T: WireCode>(value: T) -> FieldValue {
    FieldValue::Code(value.code())
}

/// Login Request: opens a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login user name.
    pub username: String,
    /// Login password.
    pub password: String,
}

impl BoeMessage for LoginRequest {
    const MESSAGE_TYPE: MessageType = MessageType::LoginRequest;

    fn to_record(&self) -> Record {
        smallvec![text(&self.username), text(&self.password)]
    }

    fn from_record(record: Record) -> Result<Self, DecodeError> {
        let mut r = RecordReader::new(Self::MESSAGE_TYPE, record);
        let msg = Self {
            username: r.text("username")?,
            password: r.text("password")?,
        };
        r.finish()?;
        Ok(msg)
    }
}

/// One side of a cross order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrossAllocation {
    /// Side of this allocation.
    pub side: Side,
    /// Quantity allocated to this side.
    pub alloc_qty: u32,
    /// Client order id for this allocation.
    pub cl_ord_id: String,
    /// Order capacity.
    pub capacity: Capacity,
    /// Clearing firm identifier.
    pub clearing_firm: String,
    /// Clearing account, left-padded on the wire.
    pub clearing_account: String,
}

impl CrossAllocation {
    fn to_record(&self) -> Record {
        smallvec![
            code(self.side),
            FieldValue::UInt(u64::from(self.alloc_qty)),
            text(&self.cl_ord_id),
            code(self.capacity),
            text(&self.clearing_firm),
            text(&self.clearing_account),
        ]
    }

    fn read(r: &mut RecordReader) -> Result<Self, DecodeError> {
        Ok(Self {
            side: r.code("side")?,
            alloc_qty: r.uint("alloc_qty")?,
            cl_ord_id: r.text("cl_ord_id")?,
            capacity: r.code("capacity")?,
            clearing_firm: r.text("clearing_firm")?,
            clearing_account: r.text("clearing_account")?,
        })
    }
}

/// New Order Cross: a paired order with a repeating group of allocations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewOrderCross {
    /// Cross identifier.
    pub cross_id: String,
    /// Cross type.
    pub cross_type: CrossType,
    /// Cross prioritization.
    pub cross_prioritization: CrossPrioritization,
    /// Instrument symbol.
    pub symbol: String,
    /// Cross price.
    pub price: Price,
    /// Total quantity on each side.
    pub order_qty: u32,
    /// Allocations, in wire order.
    pub allocations: Vec<CrossAllocation>,
}

impl BoeMessage for NewOrderCross {
    const MESSAGE_TYPE: MessageType = MessageType::NewOrderCross;

    fn to_record(&self) -> Record {
        smallvec![
            text(&self.cross_id),
            code(self.cross_type),
            code(self.cross_prioritization),
            text(&self.symbol),
            FieldValue::Price(self.price),
            FieldValue::UInt(u64::from(self.order_qty)),
            FieldValue::Group(
                self.allocations
                    .iter()
                    .map(CrossAllocation::to_record)
                    .collect()
            ),
        ]
    }

    fn from_record(record: Record) -> Result<Self, DecodeError> {
        let mut r = RecordReader::new(Self::MESSAGE_TYPE, record);
        let msg = Self {
            cross_id: r.text("cross_id")?,
            cross_type: r.code("cross_type")?,
            cross_prioritization: r.code("cross_prioritization")?,
            symbol: r.text("symbol")?,
            price: r.price("price")?,
            order_qty: r.uint("order_qty")?,
            allocations: r.group("allocations", CrossAllocation::read)?,
        };
        r.finish()?;
        Ok(msg)
    }
}

/// New Order: a single-sided order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewOrder {
    /// Client order id.
    pub cl_ord_id: String,
    /// Order side.
    pub side: Side,
    /// Order quantity.
    pub order_qty: u32,
    /// Limit price.
    pub price: Price,
    /// Instrument symbol.
    pub symbol: String,
    /// Order type.
    pub ord_type: OrdType,
    /// Time in force.
    pub time_in_force: TimeInForce,
    /// Order capacity.
    pub capacity: Capacity,
    /// Displayed quantity for reserve orders, zero when fully displayed.
    pub max_floor: u32,
}

impl BoeMessage for NewOrder {
    const MESSAGE_TYPE: MessageType = MessageType::NewOrder;

    fn to_record(&self) -> Record {
        smallvec![
            text(&self.cl_ord_id),
            code(self.side),
            FieldValue::UInt(u64::from(self.order_qty)),
            FieldValue::Price(self.price),
            text(&self.symbol),
            code(self.ord_type),
            code(self.time_in_force),
            code(self.capacity),
            FieldValue::UInt(u64::from(self.max_floor)),
        ]
    }

    fn from_record(record: Record) -> Result<Self, DecodeError> {
        let mut r = RecordReader::new(Self::MESSAGE_TYPE, record);
        let msg = Self {
            cl_ord_id: r.text("cl_ord_id")?,
            side: r.code("side")?,
            order_qty: r.uint("order_qty")?,
            price: r.price("price")?,
            symbol: r.text("symbol")?,
            ord_type: r.code("ord_type")?,
            time_in_force: r.code("time_in_force")?,
            capacity: r.code("capacity")?,
            max_floor: r.uint("max_floor")?,
        };
        r.finish()?;
        Ok(msg)
    }
}

/// Cancel Order: cancels a resting order by its original client order id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CancelOrder {
    /// Client order id of the order to cancel.
    pub orig_cl_ord_id: String,
    /// Clearing firm identifier.
    pub clearing_firm: String,
}

impl BoeMessage for CancelOrder {
    const MESSAGE_TYPE: MessageType = MessageType::CancelOrder;

    fn to_record(&self) -> Record {
        smallvec![text(&self.orig_cl_ord_id), text(&self.clearing_firm)]
    }

    fn from_record(record: Record) -> Result<Self, DecodeError> {
        let mut r = RecordReader::new(Self::MESSAGE_TYPE, record);
        let msg = Self {
            orig_cl_ord_id: r.text("orig_cl_ord_id")?,
            clearing_firm: r.text("clearing_firm")?,
        };
        r.finish()?;
        Ok(msg)
    }
}

/// Client Heartbeat: header only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientHeartbeat;

impl BoeMessage for ClientHeartbeat {
    const MESSAGE_TYPE: MessageType = MessageType::ClientHeartbeat;

    fn to_record(&self) -> Record {
        Record::new()
    }

    fn from_record(record: Record) -> Result<Self, DecodeError> {
        RecordReader::new(Self::MESSAGE_TYPE, record).finish()?;
        Ok(Self)
    }
}

/// Any supported BOE message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Login Request (1).
    LoginRequest(LoginRequest),
    /// New Order Cross (2).
    NewOrderCross(NewOrderCross),
    /// New Order (3).
    NewOrder(NewOrder),
    /// Cancel Order (4).
    CancelOrder(CancelOrder),
    /// Client Heartbeat (5).
    ClientHeartbeat(ClientHeartbeat),
}

impl Message {
    /// Returns the message type of this variant.
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        match self {
            Self::LoginRequest(_) => MessageType::LoginRequest,
            Self::NewOrderCross(_) => MessageType::NewOrderCross,
            Self::NewOrder(_) => MessageType::NewOrder,
            Self::CancelOrder(_) => MessageType::CancelOrder,
            Self::ClientHeartbeat(_) => MessageType::ClientHeartbeat,
        }
    }

    /// Flattens the message body into schema-ordered field values.
    #[must_use]
    pub fn to_record(&self) -> Record {
        match self {
            Self::LoginRequest(m) => m.to_record(),
            Self::NewOrderCross(m) => m.to_record(),
            Self::NewOrder(m) => m.to_record(),
            Self::CancelOrder(m) => m.to_record(),
            Self::ClientHeartbeat(m) => m.to_record(),
        }
    }

    /// Builds the variant selected by `message_type` from a decoded record.
    ///
    /// # Errors
    /// Returns `DecodeError` if the record does not match the message shape.
    pub fn from_record(message_type: MessageType, record: Record) -> Result<Self, DecodeError> {
        Ok(match message_type {
            MessageType::LoginRequest => Self::LoginRequest(LoginRequest::from_record(record)?),
            MessageType::NewOrderCross => Self::NewOrderCross(NewOrderCross::from_record(record)?),
            MessageType::NewOrder => Self::NewOrder(NewOrder::from_record(record)?),
            MessageType::CancelOrder => Self::CancelOrder(CancelOrder::from_record(record)?),
            MessageType::ClientHeartbeat => {
                Self::ClientHeartbeat(ClientHeartbeat::from_record(record)?)
            }
        })
    }
}

macro_rules! message_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Message {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

message_from!(LoginRequest, NewOrderCross, NewOrder, CancelOrder, ClientHeartbeat);
