// src/journal.rs
use crate::models::journal::Article;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

const IMAGE_HOST: &str = "https://lh3.googleusercontent.com/aida-public/";

lazy_static! {
    static ref ARTICLES: Vec<Article> = vec![
        article(
            "featured-story",
            "The Art of Slow Living",
            "In a world that demands speed, we choose rhythm.",
            (2023, 10, 12),
            "Editorial",
            "AB6AXuDjigXpglYo4leeMTu45JnJkXx1nU7aJ7aUJaK5Vls2fysIVGtOYNRfMNV8VXiQ1ihTdUwvRZ5lDgtW8FvbPBX_vVJdvj7bbHDa7EZ5luhhWn04fvDCuFcGcyLUxT0fti3ZyV5hMgMiDJ6y-0b8iShRwhJLgaxudU9NJCTrxfIML9RAFHhh4993OmrPc_GTpk_UKfiRw_MfNTepMM3BhuURPqBPoEyY83NR6_AOCBLi_5BJ9WlBUBpLPyDwcb6GET8T2R6YZnaPSE4",
            "Slow living is doing everything at the right speed. In the atelier every garment begins with the feel of raw linen and organic cotton, long before a sketch.",
        ),
        article(
            "dyeing-with-earth",
            "Dyeing with Earth",
            "A Guide to Natural Pigments",
            (2023, 9, 28),
            "Craft",
            "AB6AXuDeIod0vV17vUMpC7TkI79sNAxa6yB3-WWXfI-E3vWaFqHqVzduEbM2-p3OIp5ZaRs3p7kZbINwKpbAz8GF6HjF9catpYnPmJTzqhT7ofkDUnYPfhhur8CzAxasfyJyiBVQZj2qp3CiTm_JlrvQAGCzj9wDE_3YS2FcaMHClMAis3AW3vfxrhSkdI3EQ96iEkvdSFnV137Fh33KYSdwjppQv-t_qdKh-hdlZb_iyKvNF0WPmDMqmMueVGr0edkXoi2n-go9bUg7SOM",
            "Avocado pits give dusty rose, onion skins a warm gold. Notes from our workshop on coaxing color out of kitchen scraps and local flora.",
        ),
        article(
            "sustainable-journey",
            "Behind the Seams",
            "Our Sustainable Journey",
            (2023, 9, 15),
            "Transparency",
            "AB6AXuAWFa0qBMX5heg1scwaALKhXqJ9FmK7j9yB9L8roxwD1GjWuT73lWEcUAN5wTMqQzFseNnZ0NW4pjBr5l4hOHvSocpdBLEPC_RgCQM_kstUZq1UrBOlTgcVLqKkaAW6XMUlDok1ETFoUQPZfSGbBGLUQvsG-x-yQ5vZER9fGRDYfZv7PAFd0hwP7pn4IY469vkSnY5nwM4mOHHmvIOPlwYg4EOMDsrzfAPb0CVGrIYC6IWDwq2VpJxqIA9CkgcX8m3FioKGp4vlHuA",
            "Where our fibers come from, who sews them and what we are still getting wrong: a plain account of the supply chain.",
        ),
        article(
            "language-of-flowers",
            "The Language of Flowers",
            "Deciphering nature's silent messages.",
            (2023, 8, 10),
            "Botany",
            "AB6AXuCRqC5DebC8Ev3b4P00J7AJWASHDAZH5dxG6YYoTiJzTeoE39_jz-X1Qi2x_jjkf2pqcJlU26UWLeYLXVaMfjL55kGnKUzgPmaAETKSwaInbtrv6yW6R9cDuD7xhmFKCN4B2QVNwWABbCZ0k9Nnjl2EB-r0uoKsa_Ptj_MEsz7gAsER1MAGRd1wZsfRj2iCcnvA94IZODNrL6cy65EptSA8qVhdkfh7g16Hzx8O8BSQ4NF8s9utamYB11p5Cje9vN6pBLkxyzoCQ-c",
            "Victorian floriography gave every bloom a meaning. The prints in this season's collection borrow a few of them.",
        ),
        article(
            "rituals-of-morning",
            "Rituals of Morning",
            "Starting the day with intention.",
            (2023, 7, 22),
            "Wellness",
            "AB6AXuC2-zJlMm6CmyJX23rqkdpFeltGOGd_E35-T_jaG7E2bpNyaeylN9U0Vhl0x_tqUNWWxPUFN0c10ZhFZ0qoF2B9aYDLUsbJYsNhnoeDU2tXQ12wtDtOWkLTtRZBiRfEZCDdoF0irllA3z54Dcxftp01X1KBnJsdPGEq-t90D-MFz97Hlk-6Egeq1WffPDu7DSyANTen0bKvPJi2qFMqErGlqYkz1f4QdaRk3OnG0gohv6hfrpYiDnIoZwl5XkbiIKToQ9CcZqoIF1w",
            "Tea before screens, a window opened to the weather, ten quiet minutes. Small habits the studio swears by.",
        ),
    ];

    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

fn article(
    slug: &'static str,
    title: &'static str,
    subtitle: &'static str,
    (year, month, day): (i32, u32, u32),
    category: &'static str,
    image_key: &'static str,
    excerpt: &'static str,
) -> Article {
    Article {
        slug,
        title,
        subtitle,
        // Fixture dates are literal calendar dates.
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        category,
        image: format!("{}{}", IMAGE_HOST, image_key),
        excerpt,
    }
}

/// Newest first.
pub fn articles() -> &'static [Article] {
    &ARTICLES
}

pub fn find_article(slug: &str) -> Option<&'static Article> {
    ARTICLES.iter().find(|a| a.slug == slug)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_articles_newest_first() {
        assert_eq!(articles().len(), 5);
        assert!(articles().windows(2).all(|w| w[0].date > w[1].date));
    }

    #[test]
    fn test_find_article() {
        let story = find_article("dyeing-with-earth").unwrap();
        assert_eq!(story.category, "Craft");
        assert_eq!(story.date, NaiveDate::from_ymd_opt(2023, 9, 28).unwrap());
        assert!(find_article("no-such-story").is_none());
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("fern@terramuse.example"));
        assert!(is_valid_email("  fern@terramuse.example "));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("fern"));
        assert!(!is_valid_email("fern@localhost"));
        assert!(!is_valid_email("a b@c.d"));
    }
}
