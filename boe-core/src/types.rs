/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Core types for BOE messages.
//!
//! This module provides the value types carried by message fields:
//! - [`MessageType`]: Message type identifier from the header
//! - [`Price`]: Fixed-point decimal with an implied scale
//! - [`WireCode`]: Trait for single-byte enumerated codes
//! - [`Side`], [`Capacity`], [`CrossType`], [`CrossPrioritization`],
//!   [`OrdType`], [`TimeInForce`]: Enumerated field values

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message type identifier carried in the header.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u16)]
pub enum MessageType {
    /// Login Request (1).
    LoginRequest = 1,
    /// New Order Cross (2).
    NewOrderCross = 2,
    /// New Order (3).
    NewOrder = 3,
    /// Cancel Order (4).
    CancelOrder = 4,
    /// Client Heartbeat (5).
    ClientHeartbeat = 5,
}

impl MessageType {
    /// All message types known to this crate.
    pub const ALL: [Self; 5] = [
        Self::LoginRequest,
        Self::NewOrderCross,
        Self::NewOrder,
        Self::CancelOrder,
        Self::ClientHeartbeat,
    ];

    /// Looks up a message type by its wire identifier.
    #[inline]
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        <Self as FromPrimitive>::from_u16(value)
    }

    /// Returns the wire identifier.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns the message name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LoginRequest => "LoginRequest",
            Self::NewOrderCross => "NewOrderCross",
            Self::NewOrder => "NewOrder",
            Self::CancelOrder => "CancelOrder",
            Self::ClientHeartbeat => "ClientHeartbeat",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u16())
    }
}

impl From<MessageType> for u16 {
    fn from(value: MessageType) -> Self {
        value.as_u16()
    }
}

impl TryFrom<u16> for MessageType {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_u16(value).ok_or(value)
    }
}

/// Error returned when a message type name or number is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised message type: {0}")]
pub struct ParseMessageTypeError(pub String);

impl FromStr for MessageType {
    type Err = ParseMessageTypeError;

    /// Parses a message type from its number (`"1"`) or its name, ignoring
    /// case, dashes and underscores (`"login-request"`, `"LoginRequest"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.trim().parse::<u16>() {
            return Self::from_u16(id).ok_or_else(|| ParseMessageTypeError(s.to_string()));
        }

        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|ty| ty.name().to_lowercase() == wanted)
            .ok_or_else(|| ParseMessageTypeError(s.to_string()))
    }
}

/// Fixed-point decimal value.
///
/// The wire carries only the integer mantissa; the scale is implied by the
/// field definition. Keeping both avoids any floating-point rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    mantissa: i64,
    scale: u8,
}

impl Price {
    /// Implied scale used by BOE price fields.
    pub const DEFAULT_SCALE: u8 = 4;

    /// Largest scale with an exact [`Decimal`] form.
    pub const MAX_SCALE: u8 = 28;

    /// Creates a price from a mantissa and scale.
    ///
    /// # Arguments
    /// * `mantissa` - The raw integer value
    /// * `scale` - Number of implied decimal digits
    #[inline]
    #[must_use]
    pub const fn new(mantissa: i64, scale: u8) -> Self {
        Self { mantissa, scale }
    }

    /// Creates a price with the default scale of 4.
    #[inline]
    #[must_use]
    pub const fn from_mantissa(mantissa: i64) -> Self {
        Self::new(mantissa, Self::DEFAULT_SCALE)
    }

    /// Returns the raw mantissa.
    #[inline]
    #[must_use]
    pub const fn mantissa(self) -> i64 {
        self.mantissa
    }

    /// Returns the implied scale.
    #[inline]
    #[must_use]
    pub const fn scale(self) -> u8 {
        self.scale
    }

    /// Converts to an exact decimal.
    ///
    /// # Returns
    /// `None` if the scale is above [`Price::MAX_SCALE`].
    #[must_use]
    pub fn to_decimal(self) -> Option<Decimal> {
        Decimal::try_new(self.mantissa, u32::from(self.scale)).ok()
    }

    /// Converts a decimal into a price with the given scale.
    ///
    /// # Returns
    /// `None` if the decimal has more fractional digits than `scale`, the
    /// scale is above [`Price::MAX_SCALE`], or the mantissa does not fit in
    /// an `i64`.
    #[must_use]
    pub fn from_decimal(value: Decimal, scale: u8) -> Option<Self> {
        let value = value.normalize();
        if scale > Self::MAX_SCALE || value.scale() > u32::from(scale) {
            return None;
        }
        let mut scaled = value;
        scaled.rescale(u32::from(scale));
        i64::try_from(scaled.mantissa())
            .ok()
            .map(|mantissa| Self::new(mantissa, scale))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal() {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "{}e-{}", self.mantissa, self.scale),
        }
    }
}

/// A single-byte enumerated code.
pub trait WireCode: Sized + Copy {
    /// Looks up the variant for a raw code byte.
    fn from_code(code: u8) -> Option<Self>;

    /// Returns the raw code byte.
    fn code(self) -> u8;
}

macro_rules! wire_code {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WireCode for $ty {
                #[inline]
                fn from_code(code: u8) -> Option<Self> {
                    <Self as FromPrimitive>::from_u8(code)
                }

                #[inline]
                fn code(self) -> u8 {
                    <Self as ToPrimitive>::to_u8(&self).unwrap_or_default()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.code() as char)
                }
            }
        )*
    };
}

/// Order side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum Side {
    /// Buy.
    Buy = b'1',
    /// Sell.
    Sell = b'2',
    /// Sell short.
    SellShort = b'5',
    /// Sell short exempt.
    SellShortExempt = b'6',
}

impl Side {
    /// Returns true if this is a buy-side order.
    #[must_use]
    pub const fn is_buy(self) -> bool {
        matches!(self, Self::Buy)
    }
}

/// Order capacity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum Capacity {
    /// Broker-dealer.
    BrokerDealer = b'B',
    /// Customer.
    Customer = b'C',
    /// Firm.
    Firm = b'F',
    /// Market maker.
    MarketMaker = b'M',
    /// Professional customer.
    ProfessionalCustomer = b'U',
}

/// Cross order type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum CrossType {
    /// Automated improvement mechanism auction.
    Aim = b'1',
    /// Qualified contingent cross.
    Qcc = b'2',
    /// Solicitation auction.
    Solicitation = b'3',
}

/// Which side of a cross has priority over resting interest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum CrossPrioritization {
    /// No prioritization.
    NoPriority = b'0',
    /// Buy side prioritized.
    Buy = b'1',
    /// Sell side prioritized.
    Sell = b'2',
}

/// Order type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum OrdType {
    /// Market order.
    Market = b'1',
    /// Limit order.
    Limit = b'2',
}

/// Time in force.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum TimeInForce {
    /// Good for the day.
    Day = b'0',
    /// Good till cancelled.
    Gtc = b'1',
    /// Immediate or cancel.
    Ioc = b'3',
}

wire_code!(Side, Capacity, CrossType, CrossPrioritization, OrdType, TimeInForce);
