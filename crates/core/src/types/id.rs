//! Typed row ids.
//!
//! Every table gets its own id type so a `ProductId` can never be passed
//! where an `OrderId` is expected. Ids are assigned by the store, start at 1,
//! and are never reused.

/// Declare an `i32` id newtype.
///
/// The generated type is `Copy` and ordered by value. It serializes and
/// displays as the bare number.
///
/// ```rust
/// # use shop_core::define_id;
/// define_id!(CouponId);
/// define_id!(ShipmentId);
///
/// let coupon = CouponId::new(3);
/// assert_eq!(coupon.as_i32(), 3);
/// // let _: ShipmentId = coupon; // mismatched types
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw id.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// The raw id.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(CustomerId);
define_id!(SellerId);
define_id!(CategoryId);
define_id!(ProductId);
define_id!(OrderId);
define_id!(OrderItemId);
define_id!(PaymentId);

// A seller shares its identity with the customer record it specializes.
impl From<SellerId> for CustomerId {
    fn from(id: SellerId) -> Self {
        Self(id.0)
    }
}

impl SellerId {
    /// The id of the customer record this seller extends.
    #[must_use]
    pub const fn customer_id(&self) -> CustomerId {
        CustomerId(self.0)
    }
}
