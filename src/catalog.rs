//! Built-in listings that don't live in the database: the regional directory
//! merged into search results, the places behind the luck wheel and the mock
//! service list served by the `mock_api` binary.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ExternalListing {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub base_price: &'static str,
    pub average_rating: f64,
    pub location: &'static str,
    pub images: &'static [&'static str],
    pub description: &'static str,
    pub features: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'static str>,
    pub is_external: bool,
}

pub static EXTERNAL_LISTINGS: &[ExternalListing] = &[
    ExternalListing {
        id: "hail_millennium",
        title: "فندق ميلينيوم حائل (Millennium Hail Hotel)",
        category: "venue",
        base_price: "يبدأ من 5000 ريال",
        average_rating: 4.8,
        location: "طريق الملك فهد، حائل",
        images: &["https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?w=800&q=80"],
        description: "فندق 5 نجوم فاخر يضم قاعات زفاف راقية ومرافق متكاملة للمؤتمرات والمناسبات.",
        features: &["قاعة كبرى", "بوفيه مفتوح", "مواقف سيارات", "إقامة للضيوف"],
        phone: Some("0165320000"),
        is_external: true,
    },
    ExternalListing {
        id: "hail_grand_hall",
        title: "قاعة التاج للإحتفالات",
        category: "venue",
        base_price: "15000 ريال",
        average_rating: 4.5,
        location: "حي المطار، حائل",
        images: &["https://images.unsplash.com/photo-1519167758481-83f550bb49b3?w=800&q=80"],
        description: "واحدة من أكبر قاعات حائل، تتسع لأكثر من 500 ضيف مع خدمات ضيافة مميزة.",
        features: &["سعة 500+", "غرفة عروس", "نظام صوتي وتصوير", "قهوة عربية"],
        phone: None,
        is_external: true,
    },
    ExternalListing {
        id: "hail_palace_roses",
        title: "قصر الورود",
        category: "venue",
        base_price: "20000 ريال",
        average_rating: 4.7,
        location: "طريق الدائري، حائل",
        images: &["https://images.unsplash.com/photo-1469334031218-e382a71b716b?w=800&q=80"],
        description: "قصر فخم للمناسبات الكبيرة، يتميز بالتصميم الكلاسيكي والخدمة الملكية.",
        features: &["قسمين (رجال/نساء)", "عشاء فاخر", "إضاءة ليزر"],
        phone: None,
        is_external: true,
    },
    ExternalListing {
        id: "hail_lens_studio",
        title: "ستوديو عدسة الشمال",
        category: "photography",
        base_price: "2500 ريال",
        average_rating: 4.9,
        location: "حي صديان، حائل",
        images: &["https://images.unsplash.com/photo-1554048612-387768052bf7?w=800&q=80"],
        description: "تصوير احترافي للأعراس والمناسبات بأحدث الكاميرات وطاقم نسائي متخصص.",
        features: &["تصوير فيديو 4K", "طباعة فورية", "ألبوم ديجيتال"],
        phone: None,
        is_external: true,
    },
    ExternalListing {
        id: "hail_florist_jouri",
        title: "زهور وجوري لتنسيق الحفلات",
        category: "decoration",
        base_price: "1500 ريال",
        average_rating: 4.6,
        location: "شارع الثلاثين، حائل",
        images: &["https://images.unsplash.com/photo-1562690868-60bbe7293e94?w=800&q=80"],
        description: "تنسيق كوش افراح، طاولات استقبال، ومداخل بأجمل الزهور الطبيعية والصناعية.",
        features: &["كوش حديثة", "بوكيه عروس", "تزيين سيارات"],
        phone: None,
        is_external: true,
    },
    ExternalListing {
        id: "hail_catering_golden",
        title: "بوفيه المذاق الذهبي",
        category: "catering",
        base_price: "120 ريال للشخص",
        average_rating: 4.4,
        location: "حائل",
        images: &["https://images.unsplash.com/photo-1555244162-803834f70033?w=800&q=80"],
        description: "تقديم أرقى المأكولات الشرقية والغربية بلمسة سعودية أصيلة.",
        features: &["بوفيه مفتوح", "ذبائح", "مقبلات وسلطات"],
        phone: None,
        is_external: true,
    },
    ExternalListing {
        id: "hail_resort_yamama",
        title: "منتجع اليمامة",
        category: "venue",
        base_price: "1200 ريال",
        average_rating: 4.3,
        location: "عقدة، حائل",
        images: &["https://images.unsplash.com/photo-1582719508461-905c673771fd?w=800&q=80"],
        description: "منتجع ريفي جميل في منطقة عقدة، مثالي للمناسبات الصغيرة والعائلية.",
        features: &["مسبح", "جلسات خارجية", "مشبات"],
        phone: None,
        is_external: true,
    },
    ExternalListing {
        id: "hail_beauty_center",
        title: "مركز لمسات حائل (Lamasat)",
        category: "other",
        base_price: "300 ريال",
        average_rating: 4.7,
        location: "حي الجامعيين، حائل",
        images: &["https://images.unsplash.com/photo-1560750588-73207b1ef5b8?w=800&q=80"],
        description: "مركز تجميل متكامل للعروس ومرافقاتها.",
        features: &["مكياج", "تسريحات", "حمام مغربي"],
        phone: None,
        is_external: true,
    },
];

/// Same filter the database search applies: category unless `all`, then a
/// case-insensitive substring match on title, description or location.
/// Results are ordered best rated first.
pub fn search_external(query: Option<&str>, category: Option<&str>) -> Vec<&'static ExternalListing> {
    let needle = query.map(str::to_lowercase);

    let mut hits: Vec<&'static ExternalListing> = EXTERNAL_LISTINGS
        .iter()
        .filter(|listing| match category {
            Some(category) if category != "all" => listing.category == category,
            _ => true,
        })
        .filter(|listing| match &needle {
            Some(needle) => [listing.title, listing.description, listing.location]
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .collect();

    hits.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
    hits
}

#[derive(Debug, Clone, Serialize)]
pub struct Place {
    pub id: u32,
    pub name: &'static str,
    pub kind: &'static str,
    pub rating: f64,
    pub icon: &'static str,
}

pub static LUCK_PLACES: &[Place] = &[
    Place { id: 1, name: "مطعم التراثي", kind: "مطعم شعبي", rating: 4.8, icon: "🥘" },
    Place { id: 2, name: "كافيه جاز لاونج", kind: "قهوة مختصة", rating: 4.5, icon: "☕" },
    Place { id: 3, name: "مشويات حائل", kind: "مشويات", rating: 4.7, icon: "🍖" },
    Place { id: 4, name: "منتجع السمراء", kind: "ترفيه وعشاء", rating: 4.9, icon: "⛰️" },
    Place { id: 5, name: "برجر بوتيك", kind: "وجبات سريعة", rating: 4.3, icon: "🍔" },
    Place { id: 6, name: "كنافة الأرياف", kind: "حلويات", rating: 4.6, icon: "🍮" },
    Place { id: 7, name: "مطعم القرية اللبنانية", kind: "عشاء فاخر", rating: 4.4, icon: "🥗" },
];

#[derive(Debug, Clone, Serialize)]
pub struct MockService {
    pub id: u32,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub location: &'static str,
    pub price: u32,
}

pub static MOCK_SERVICES: &[MockService] = &[
    MockService { id: 1, name: "قاعة السرايا", kind: "venue", location: "Hail", price: 15000 },
    MockService { id: 2, name: "بوفيه الأرجوان", kind: "catering", location: "Hail", price: 5000 },
    MockService { id: 3, name: "تنظيم إبداع", kind: "planner", location: "Hail", price: 3000 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_filter_keeps_only_that_category() {
        let hits = search_external(None, Some("venue"));
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|l| l.category == "venue"));
        assert_eq!(hits[0].id, "hail_millennium");
    }

    #[test]
    fn all_category_is_no_filter() {
        assert_eq!(search_external(None, Some("all")).len(), EXTERNAL_LISTINGS.len());
    }

    #[test]
    fn query_matches_location_and_case_insensitive_titles() {
        let hits = search_external(Some("millennium"), None);
        assert_eq!(hits.len(), 1);

        let hits = search_external(Some("عقدة"), None);
        assert_eq!(hits[0].id, "hail_resort_yamama");
    }

    #[test]
    fn results_are_best_rated_first() {
        let hits = search_external(Some("حائل"), None);
        assert!(hits.windows(2).all(|w| w[0].average_rating >= w[1].average_rating));
    }
}
