// src/catalog.rs
//! The fixed product catalog every listing, search and chat prompt is built from.
//! Loaded once on first access and never mutated.

use crate::models::product::{Category, Product};
use lazy_static::lazy_static;
use rust_decimal::Decimal;

const IMAGE_HOST: &str = "https://lh3.googleusercontent.com/aida-public/";

struct Seed {
    id: u32,
    title: &'static str,
    category: Category,
    price: i64,
    image: &'static str,
    color: Option<&'static str>,
    is_new: bool,
    is_low_stock: bool,
}

impl Seed {
    fn to_product(&self) -> Product {
        Product {
            id: self.id,
            title: self.title.to_string(),
            category: self.category,
            price: Decimal::from(self.price),
            image: format!("{}{}", IMAGE_HOST, self.image),
            color: self.color.map(str::to_string),
            is_new: self.is_new,
            is_low_stock: self.is_low_stock,
            is_best_seller: false,
            description: None,
        }
    }
}

const SEEDS: &[Seed] = &[
    Seed {
        id: 1,
        title: "Sienna Linen Jumpsuit",
        category: Category::Apparel,
        price: 148,
        image: "AB6AXuCiBilpPuE37cAyjCSfxth0ARy5l-4YqeDdyRm2rbQQtIYtWSx5iKjlY_OCJnd4lcxybYEcf7CYmNOTovF91rndFUN29f3mAxTp_gGfpnSKQ7atZnHiY-KHXvoftl9e8hx8TZJpDLTHA7NXgcLP6uYtwfhEKKYPtt6wqW5rqknv17Y6P1VDCah5Z1Fd3LfkwGvNuPsbzvmQfB3KId5n82oKa8x5KxhJu7Jmaa5DbeC0jjRcoVr6pkC2plCIEqaLZmss9RQIGU1gagI",
        color: Some("Terracotta"),
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 2,
        title: "Willow Gauze Blouse",
        category: Category::Apparel,
        price: 89,
        image: "AB6AXuAfWrB4owHD0huZoejINK1B_Jb8vEJzzBdkLZfsusOx28L3oNtM7FpH6M6OnKXFjOf-Waj67SA3Se6CbPjNB8mO-6oUo4_03oEbW0VB4HWWelM13bW3dkJgaMokhnXWZJWQR-pHEsXVq1zedpGIGHKZLb3SU_dyspiuq99PV0YOkpoVoJfNklpm22wyRiN3sSrJ5-kTNiaeghzyGKa3Fa6qyibenmPS2wsnRsxv0WNcbWbTiE-H7B-vECK7CcX7MsIjlPKkyAQxmvM",
        color: Some("Ivory"),
        is_new: true,
        is_low_stock: false,
    },
    Seed {
        id: 3,
        title: "Terra Midi Dress",
        category: Category::Apparel,
        price: 120,
        image: "AB6AXuCRqC5DebC8Ev3b4P00J7AJWASHDAZH5dxG6YYoTiJzTeoE39_jz-X1Qi2x_jjkf2pqcJlU26UWLeYLXVaMfjL55kGnKUzgPmaAETKSwaInbtrv6yW6R9cDuD7xhmFKCN4B2QVNwWABbCZ0k9Nnjl2EB-r0uoKsa_Ptj_MEsz7gAsER1MAGRd1wZsfRj2iCcnvA94IZODNrL6cy65EptSA8qVhdkfh7g16Hzx8O8BSQ4NF8s9utamYB11p5Cje9vN6pBLkxyzoCQ-c",
        color: Some("Sand"),
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 4,
        title: "Sage Knit Cardigan",
        category: Category::Apparel,
        price: 110,
        image: "AB6AXuC2-zJlMm6CmyJX23rqkdpFeltGOGd_E35-T_jaG7E2bpNyaeylN9U0Vhl0x_tqUNWWxPUFN0c10ZhFZ0qoF2B9aYDLUsbJYsNhnoeDU2tXQ12wtDtOWkLTtRZBiRfEZCDdoF0irllA3z54Dcxftp01X1KBnJsdPGEq-t90D-MFz97Hlk-6Egeq1WffPDu7DSyANTen0bKvPJi2qFMqErGlqYkz1f4QdaRk3OnG0gohv6hfrpYiDnIoZwl5XkbiIKToQ9CcZqoIF1w",
        color: Some("Sage Green"),
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 5,
        title: "Artisan Woven Tunic",
        category: Category::Apparel,
        price: 135,
        image: "AB6AXuAy_d24AUDdALbaKi1P2PmADh-fZK79t_O4r0Y3ftTIuosESpJud2mKvLuHA0ORgUR8BDFguXrrPctv8EMijJb9PCTGNvj3bY7IamcoORiRwZrbDg5pqNZsXQue6ZWkT5LZM7kp0Oe7DFCdxgvpDX8WLIPTJGXAJo6JKcs8J9UCLu4o63KSdyxsoBkeuFKHrfcF_77dMQVndQsXIAnYuO0Ss1stUP1vHQBhHBOlBtGE5YRJQwag-gJUnkk5CniP5w-rrwO-0GLWGeo",
        color: Some("Natural"),
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 6,
        title: "Nomad Wrap Coat",
        category: Category::Apparel,
        price: 210,
        image: "AB6AXuDqAdZcIT252aSlQS6Y5KkgS04sgUm0ou5JR6XEzKDQFX-26tpevXawNIoFqT_ABe_4rX3Sy4f1ruAjEZeVti27--xa-ef13bEFyM9Q27HV1NRulx06dvmxGXXEf0T96ICQjBLePQsZYehLoPZ0UvINkbbjNIquKUG1bVk6ujOrZoAxCZ25vksufxjin2TnQ_oPhTkJTqz2UEpHWUDeYKfQuyOMoCYgORzZRBjZiB7YngkRfo1DNvHb2j3xKueWMi0sDpLuB-BIzWc",
        color: Some("Charon Charcoal"),
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 7,
        title: "Clay Wide Leg Pants",
        category: Category::Apparel,
        price: 98,
        image: "AB6AXuCMHtLObCGbVqC_2N5k-_UOk63XpjScJ-KnBlVxxj-pFWC1xqpK4Dq3bLox9y4eZLcvVG3VY7egGpuU_peWghhlmj84H1tHeJiN3sgp180xToO2P4SKxP86kRlVkLg-UUyHH0NNGOxszZ9j-WKDsViDuQD1IzsXNLjr3qzKTWr4ZxG7vuBwr2yyknaxbJU31OPD0It1MLqHds5xN_Y2YKHprgOpNRccvwkjFtjNy6NiK4khz1DadyViF47DsOYkj3ZA-CthPMGF230",
        color: Some("Rust Clay"),
        is_new: false,
        is_low_stock: true,
    },
    Seed {
        id: 8,
        title: "Lunar Phase Pendant",
        category: Category::Accessories,
        price: 85,
        image: "AB6AXuAlIHiy25PuErafah36LcBpJ0vBUrVj0qFtV5YzL3eCRbDer8weBfm9UudH1LuOSE_BRPo9yvfR88UNAvINtCFtLyjnQYiN5mE6TMSJrsgSpfMc_F0gO4TebsvCpvjX4Dinmwm10zY8lHQlMsCSjdRL1WeH1MlF-SX0_jLZDqU_4Mcl5CUu7xfp0rlOr-W9bEMTRkuIVlKniWGzVqFh2Rm1bVuxuSQHFXZ97BjnAAaOXarWWkIsFvtB0-GTOJjEdNbkS799ajutNzc",
        color: None,
        is_new: true,
        is_low_stock: false,
    },
    Seed {
        id: 9,
        title: "Woven Artisan Tote",
        category: Category::Accessories,
        price: 145,
        image: "AB6AXuDEY13AsQEs0jf5vCByQs8YdiBnhrWd8urQM81xt2mD4RmBRFyk-ukou6qFJaAYZ44R1FAuhissM49IzhUPDMFuUADV6WWXMUMpKzDGj2cbCSQD9HVJdW0w41KLSPAlDo1XhwfAZuFDJlc0MoFuKGIbXF-km3zRl8GvbDvEP6G4gP0Zy6ZKj9haC52ySqSuXTD2Eku3-PLlhQyd3PgzQjt29F4USpozKuT_DkZ5yLMvhPSE7gYTFPYwlfHwg68lZfTWhGrTZzWsxok",
        color: None,
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 10,
        title: "Silk Earth-Tone Scarf",
        category: Category::Accessories,
        price: 65,
        image: "AB6AXuBUNRdoVcw3fY4eRm1K3YEX6bdTqXiy1ZsLoG-GENW8lNOylS17kEw_Y2VLgxWh9-v3rCDfC4H_qTJyA_Ta73nh0CIBOqKReM9H0OzpfiwiS76kJjz7oWFGiVQEVXuEFDRxM_W2qQOHJqUBbOnqWppaUibFQQvIGil2QukNSzmYK_yTUkZgdXDgRD3WvGKmQhcy-HLJ1kf1xPDJpHXjnpfFfR9o_i_qZqgf69dMUTReOAlYw-7XoYAuw_sf585ZuZYQUxT8tN-z-WE",
        color: None,
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 11,
        title: "Terracotta Clay Earrings",
        category: Category::Accessories,
        price: 42,
        image: "AB6AXuBxi1Nas0BA1aXB6VIGiq9Re0MACAmmOy6t_trgqL-96dbUTt21tPY0WRzi7_trYuhIFNKyXMNbP-aVo3vRTP3-kcup0-w2f_LVMHrtMiVpeTfOPZgyLA1B6HuZ9IgQepxLGeR_njqS59zWNypGn6GNHBqkZ5Em_vhHrQIvq953lhf4eqdULVdseYNUmK7gmu3ztANh2-gv60AJDDBRXV4Wb17Gn3ZC6CH8ol-6JakTw9MLNv_MkEYU9eJkrpl6RJKTu-SkSd3L5Ho",
        color: None,
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 12,
        title: "Braided Leather Belt",
        category: Category::Accessories,
        price: 58,
        image: "AB6AXuB_ZkYvMoewZ0plJgiIWEIb7m7sa1_In91MCkqWN6EpyArnKdpnykxSe7x8_Y705xVUYCYU4HCm8FJtBZXr_jpo8YUwHG2Uhcqs595W5OpQbIRNwSKqjNi5Vjk05LG9LoSQit74-NzxZc937CoUxifiGcZxVsInXMg3b0uSRI7xG39qOZS3iqwmduXUyT4IiFSWevngUu5mKaPjcGGIozEYsnn-bvdeuXtoAKNNifB3xvZJIFwqy0d78HlhblcsphgKdyLK1H6iNzM",
        color: None,
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 13,
        title: "Hammered Brass Cuff",
        category: Category::Accessories,
        price: 75,
        image: "AB6AXuCyfqkiUSy9XL_5-FipWdK0iQPF0zIWwRxgNDzbplVCL436XlDsA1UpkfZanKaPPp9CZOHuRg7NprAW-cXA1VWZAsDddVs7wO0l7ckAFR-So6n6X_Us3QJSgb7iyJFJ2oGvWhj4KzGvwYsXZ8zkqQs51y1n6pzZy0NywHbFKAnmx2Ds4iFwxBpYb2aritBAHDBgtB31MYKt0jjnZy2aGFRzqNrb28Z1lWvmOwInsBCvWxTzkm5dsC9HmvqZNt6m4KffmUV12f3nsGo",
        color: None,
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 14,
        title: "Ethereal Gauze Maxi",
        category: Category::Apparel,
        price: 210,
        image: "AB6AXuDTdPHFMz_so_nLzYMvpQOvk9oDMMmreY2jkoG76-1jTMXaLD25Ein7XkgkuMQ2I7o5Nwmw6IGgbD72iuUxZs2InTAe_wD5E21IME8n_G_3PDEricxTjfNMgapSQRqB-Wn4bcnJiNt-S_1whjBOoHq1d0FsSmR_XXdsP7qoOhvWid6rvKLMiDrgdgIhSX6vruudkQfb_hXy1AKdxNTYEqndzzjhAg5Ox6fJWXHK7YDjcXBRevV2OGnnjBz5eeliNQNNxQSeCLi0W1g",
        color: Some("Ivory"),
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 15,
        title: "Desert Moon Tunic",
        category: Category::Apparel,
        price: 125,
        image: "AB6AXuCmgnG54dWSDMHXo9S3w4H5V1byuqX2iwAewQCf9m28l3oJdtzy3LtESdvDNKc7EV4XOkIBX7Kvr--pHxTTcIEgBgEasKPmkCpqLc69rMCmJZDQIXK55kQ5iwwhsqoDpIDIfMFXtU7ZdZPTT3Ot1cleCOc7m98EMWCy91jTdGwlY8hfyYlQvWRdbrwT3GrRz4XDr4-27-TvhEmAtNmsojw2JwnjZ8Pj20YHJJfdTFHAyaBkmSEy5atEryH1RCDQkydTx99k8UWESQg",
        color: Some("Rust Clay"),
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 16,
        title: "Sagebrush Midi Skirt",
        category: Category::Apparel,
        price: 145,
        image: "AB6AXuBhb7D5egNwVY7cb0uV4ghmHd5NzOgW_26tG1uqjr8AVYq2DxniLGSUWZfLkwE2p1iag24HVQiNxuxUG3b1iGCgO1la6lOwvLo1dsvYhCoK6pEdx_dNP0Vmt8y10bs-y1oFcXnKWULo83ZD4h25PCVjp7TxfkBQr2gyziBwsbknb1nFJtaXtVrbNlcrM09gtr3InFMij2IKn-67RPYre90mZECu5GCnIAvV08H5zqSqLfPD2717Xdyf88o5mXZspTtsR1R4Yu3v62A",
        color: Some("Sage Green"),
        is_new: false,
        is_low_stock: false,
    },
    Seed {
        id: 17,
        title: "Canyon Silk Shirt",
        category: Category::Apparel,
        price: 130,
        image: "AB6AXuAdFrrWdc65aPfKT4H7-o2nT08NmkEkSEzD14YJQdXqITaWfgJZq6z84lhoVuf7RHLV5SSL7vMD8utQsD9Jy3T4Tpmr4PlrzEjH09Xt_jto6FOwZYIeQutSZpyUBBW6GKPcxB3gPRzK3hgCr_3u3zffRnUxfkPBwpkZT8Vd6j2isSO5jGbrzVNnmvWK7zldXznzWKALHwWETrAPPLMG3DbY6hFGGcTEy7rFf0g2OHPSvvJ1C8_JqvBSsU2LMM7L8DAjZrfgmocGiMs",
        color: Some("Terracotta"),
        is_new: false,
        is_low_stock: false,
    },
];

lazy_static! {
    static ref CATALOG: Vec<Product> = SEEDS.iter().map(Seed::to_product).collect();
}

/// All products in insertion order.
pub fn catalog() -> &'static [Product] {
    &CATALOG
}

pub fn find_product(id: u32) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.id == id)
}

pub fn products_in(category: Category) -> impl Iterator<Item = &'static Product> {
    CATALOG.iter().filter(move |p| p.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique_and_ordered() {
        let ids: Vec<u32> = catalog().iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=17).collect::<Vec<_>>());
        let unique: HashSet<u32> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_department_sizes() {
        assert_eq!(products_in(Category::Apparel).count(), 11);
        assert_eq!(products_in(Category::Accessories).count(), 6);
    }

    #[test]
    fn test_find_product() {
        let coat = find_product(6).unwrap();
        assert_eq!(coat.title, "Nomad Wrap Coat");
        assert_eq!(coat.price, Decimal::from(210));
        assert!(coat.image.starts_with(IMAGE_HOST));
        assert!(find_product(99).is_none());
    }

    #[test]
    fn test_price_serializes_as_text() {
        let json = serde_json::to_value(find_product(1).unwrap()).unwrap();
        assert_eq!(json["price"], "148");
        assert_eq!(json["category"], "Apparel");
        assert_eq!(json["is_new"], false);
        assert!(json.get("isNew").is_none());
    }
}
