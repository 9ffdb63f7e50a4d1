//! Promotion [`Package`]s and their pricing.

use common::{define_kind, money::Currency, Date, Money, Percent};
use smart_default::SmartDefault;

use crate::domain::listing::{OwnerName, Phone};

define_kind! {
    #[doc = "Promotion package a listing is posted with."]
    #[serialize_all = "camelCase"]
    enum Package {
        #[doc = "Plain listing, no promotion."]
        Free = 1,

        #[doc = "Listing pushed to the top of the list."]
        PushListing = 2,

        #[doc = "Listing showing more images."]
        MultipleImages = 3,

        #[doc = "Listing shown in a priority position of search results."]
        PriorityListing = 4,

        #[doc = "[`Package::MultipleImages`] combined with \
                 [`Package::PushListing`]."]
        ComboPackage = 5,
    }
}

/// Catalog entry describing a [`Package`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Plan {
    /// Display name.
    pub name: &'static str,

    /// Price per day, in [`Currency::Vnd`].
    pub daily: u32,

    /// Short description.
    pub description: &'static str,

    /// Detailed description.
    pub details: &'static str,
}

impl Package {
    /// Returns the catalog [`Plan`] of this [`Package`].
    #[must_use]
    pub const fn plan(self) -> &'static Plan {
        match self {
            Self::Free => &Plan {
                name: "Miễn phí",
                daily: 0,
                description: "",
                details: "Tin của bạn sẽ đưa vào danh sách theo thứ tự và \
                          giới hạn số ảnh hiển thị",
            },
            Self::PushListing => &Plan {
                name: "Đẩy tin",
                daily: 5_000,
                description: "Đẩy tin của bạn lên top danh sách",
                details: "Gói Đẩy tin giúp tin đăng của bạn xuất hiện ở vị \
                          trí cao trong danh sách.",
            },
            Self::MultipleImages => &Plan {
                name: "Tin nhiều hình ảnh",
                daily: 15_000,
                description: "Hiển thị nhiều hình ảnh hơn cho tin đăng của \
                              bạn",
                details: "Gói Tin nhiều hình ảnh cho phép bạn đăng tải và \
                          hiển thị nhiều hình ảnh hơn.",
            },
            Self::PriorityListing => &Plan {
                name: "Tin ưu tiên",
                daily: 90_000,
                description: "Hiển thị tin đăng ở vị trí ưu tiên trên trang \
                              tìm kiếm",
                details: "Gói Tin ưu tiên đảm bảo tin đăng của bạn sẽ được \
                          hiển thị ở vị trí ưu tiên.",
            },
            Self::ComboPackage => &Plan {
                name: "Tin nhiều ảnh + Đẩy tin",
                daily: 17_000,
                description: "Kết hợp ưu điểm của Tin nhiều hình ảnh và Đẩy \
                              tin",
                details: "Gói Tin nhiều ảnh + Đẩy tin là sự kết hợp hoàn hảo \
                          giữa hai tính năng.",
            },
        }
    }

    /// Indicates whether this is the [`Package::Free`] one.
    #[must_use]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }

    /// Returns the price per day of this [`Package`].
    #[must_use]
    pub fn daily_price(self) -> Money {
        Money::vnd(self.plan().daily)
    }
}

define_kind! {
    #[doc = "Promotion duration, each tier carrying its own discount."]
    #[serialize_all = "camelCase"]
    enum DurationTier {
        #[doc = "3 days, 5% off."]
        ThreeDays = 3,

        #[doc = "7 days, 10% off."]
        SevenDays = 7,

        #[doc = "30 days, 20% off."]
        ThirtyDays = 30,
    }
}

impl DurationTier {
    /// Returns the number of days in this [`DurationTier`].
    #[must_use]
    pub fn days(self) -> u16 {
        u16::from(self.u8())
    }

    /// Looks up a [`DurationTier`] by its exact number of days.
    #[must_use]
    pub fn from_days(days: u16) -> Option<Self> {
        u8::try_from(days).ok().and_then(Self::from_u8)
    }

    /// Returns the discount applied for this [`DurationTier`].
    #[must_use]
    pub const fn discount(self) -> Percent {
        match self {
            Self::ThreeDays => Percent::whole(5),
            Self::SevenDays => Percent::whole(10),
            Self::ThirtyDays => Percent::whole(20),
        }
    }
}

/// Calculates the total price of promoting a listing with the provided
/// [`Package`] for the provided [`DurationTier`].
///
/// [`Package::Free`] always costs nothing. Otherwise, the discounted amount is
/// rounded to a whole number of đồng, with halves rounded away from zero.
#[must_use]
pub fn total(package: Package, duration: DurationTier) -> Money {
    if package.is_free() {
        return Money::zero(Currency::Vnd);
    }
    package
        .daily_price()
        .times(duration.days())
        .discounted(duration.discount())
        .rounded()
}

/// Promotion chosen by a user.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Selection {
    /// Chosen [`Package`].
    #[default(Package::Free)]
    pub package: Package,

    /// Chosen [`DurationTier`].
    #[default(DurationTier::ThreeDays)]
    pub duration: DurationTier,

    /// Chosen start [`Date`] of the promotion.
    pub start_date: Option<Date>,
}

impl Selection {
    /// Returns the [`total`] price of this [`Selection`].
    #[must_use]
    pub fn total(&self) -> Money {
        total(self.package, self.duration)
    }

    /// Returns the last [`Date`] of the promotion, if it's started on some.
    #[must_use]
    pub fn ends_on(&self) -> Option<Date> {
        self.start_date?.plus_days(self.duration.days())
    }

    /// Returns the start [`Date`] sent along a created listing.
    ///
    /// [`Package::Free`] listings carry no start [`Date`].
    #[must_use]
    pub fn post_time(&self) -> Option<Date> {
        self.start_date.filter(|_| !self.package.is_free())
    }

    /// Returns the [`PostPrice`] sent along a created listing.
    ///
    /// [`Package::Free`] listings carry no [`PostPrice`].
    #[must_use]
    pub fn post_price(&self) -> Option<PostPrice> {
        (!self.package.is_free()).then(|| PostPrice {
            duration: self.duration,
            daily: self.package.daily_price(),
            package: self.package,
        })
    }

    /// Builds the bank transfer note identifying the payment for this
    /// [`Selection`].
    ///
    /// [`None`] is returned if no start [`Date`] is chosen.
    #[must_use]
    pub fn memo(&self, owner: &OwnerName, phone: &Phone) -> Option<String> {
        let start = self.start_date?;
        Some(format!(
            "{owner} - {} - {} ngay - {start} - {phone}",
            self.package.plan().name,
            self.duration.days(),
        ))
    }
}

/// Promotion price attached to a created listing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PostPrice {
    /// [`DurationTier`] of the promotion.
    pub duration: DurationTier,

    /// Undiscounted price per day.
    pub daily: Money,

    /// Promoted [`Package`].
    pub package: Package,
}

#[cfg(test)]
mod spec {
    use common::{Date, Money};

    use crate::domain::listing::{OwnerName, Phone};

    use super::{total, DurationTier, Package, Selection};

    #[test]
    fn prices_every_paid_package() {
        use DurationTier as D;
        use Package as P;

        for (package, duration, expected) in [
            (P::PushListing, D::ThreeDays, 14_250),
            (P::PushListing, D::SevenDays, 31_500),
            (P::PushListing, D::ThirtyDays, 120_000),
            (P::MultipleImages, D::ThreeDays, 42_750),
            (P::MultipleImages, D::SevenDays, 94_500),
            (P::MultipleImages, D::ThirtyDays, 360_000),
            (P::PriorityListing, D::ThreeDays, 256_500),
            (P::PriorityListing, D::SevenDays, 567_000),
            (P::PriorityListing, D::ThirtyDays, 2_160_000),
            (P::ComboPackage, D::ThreeDays, 48_450),
            (P::ComboPackage, D::SevenDays, 107_100),
            (P::ComboPackage, D::ThirtyDays, 408_000),
        ] {
            assert_eq!(
                total(package, duration),
                Money::vnd(expected),
                "{package} for {duration}",
            );
        }
    }

    #[test]
    fn free_costs_nothing() {
        for duration in DurationTier::ALL {
            assert!(total(Package::Free, *duration).is_zero());
        }
    }

    #[test]
    fn looks_up_tiers_by_days() {
        assert_eq!(DurationTier::from_days(7), Some(DurationTier::SevenDays));
        assert_eq!(DurationTier::from_days(5), None);
        assert_eq!(DurationTier::from_days(300), None);
        assert_eq!(DurationTier::ThirtyDays.days(), 30);
    }

    #[test]
    fn free_selection_carries_no_promotion() {
        let selection = Selection {
            start_date: Date::from_ymd(2026, 10, 20),
            ..Selection::default()
        };

        assert_eq!(selection.package, Package::Free);
        assert_eq!(selection.post_time(), None);
        assert_eq!(selection.post_price(), None);
    }

    #[test]
    fn paid_selection_describes_promotion() {
        let selection = Selection {
            package: Package::PushListing,
            duration: DurationTier::SevenDays,
            start_date: Date::from_ymd(2026, 10, 20),
        };

        assert_eq!(selection.ends_on(), Date::from_ymd(2026, 10, 27));
        let price = selection.post_price().unwrap();
        assert_eq!(price.daily, Money::vnd(5000));
        assert_eq!(price.package.u8(), 2);

        let owner = OwnerName::new("Nguyễn Văn A").unwrap();
        let phone = Phone::new("0912345678").unwrap();
        assert_eq!(
            selection.memo(&owner, &phone).unwrap(),
            "Nguyễn Văn A - Đẩy tin - 7 ngay - 2026-10-20 - 0912345678",
        );
        assert_eq!(
            Selection::default().memo(&owner, &phone),
            None,
            "no start date",
        );
    }
}
