//! Tests for the grant/vest/sale domain models and their input validation.

#[cfg(test)]
mod tests {
    use crate::grants::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_new_vest() -> NewVest {
        NewVest {
            grant_id: "G1".to_string(),
            vest_id: "V1".to_string(),
            vest_date: date(2023, 1, 1),
            shares_vested: 100,
            vest_price: dec!(10),
            tax_rate_vest: dec!(0.20),
        }
    }

    fn valid_new_sale() -> NewSale {
        NewSale {
            grant_id: "G1".to_string(),
            sale_id: "S1".to_string(),
            vest_id: "V1".to_string(),
            sale_date: date(2024, 2, 5),
            shares_sold: 50,
            sale_price: dec!(15),
            tax_rate_sale: dec!(0.20),
        }
    }

    #[test]
    fn new_grant_requires_id_symbol_and_stocks() {
        let grant = NewGrant {
            grant_id: "G1".to_string(),
            grant_date: date(2022, 9, 1),
            symbol: "ACME".to_string(),
            num_stocks: 400,
        };
        assert!(grant.validate().is_ok());

        let mut blank_id = grant.clone();
        blank_id.grant_id = "  ".to_string();
        assert!(matches!(
            blank_id.validate(),
            Err(GrantError::InvalidData(_))
        ));

        let mut blank_symbol = grant.clone();
        blank_symbol.symbol = String::new();
        assert!(blank_symbol.validate().is_err());

        let mut zero_stocks = grant;
        zero_stocks.num_stocks = 0;
        assert!(zero_stocks.validate().is_err());
    }

    #[test]
    fn new_vest_rejects_out_of_range_numerics() {
        assert!(valid_new_vest().validate().is_ok());

        let mut zero_shares = valid_new_vest();
        zero_shares.shares_vested = 0;
        assert!(zero_shares.validate().is_err());

        let mut negative_price = valid_new_vest();
        negative_price.vest_price = dec!(-1);
        assert!(negative_price.validate().is_err());

        let mut rate_above_one = valid_new_vest();
        rate_above_one.tax_rate_vest = dec!(1.5);
        assert!(rate_above_one.validate().is_err());

        let mut negative_rate = valid_new_vest();
        negative_rate.tax_rate_vest = dec!(-0.1);
        assert!(negative_rate.validate().is_err());
    }

    #[test]
    fn rate_bounds_are_inclusive() {
        let mut zero_rate = valid_new_vest();
        zero_rate.tax_rate_vest = dec!(0);
        assert!(zero_rate.validate().is_ok());

        let mut full_rate = valid_new_vest();
        full_rate.tax_rate_vest = dec!(1);
        assert!(full_rate.validate().is_ok());
    }

    #[test]
    fn new_sale_rejects_blank_vest_reference() {
        assert!(valid_new_sale().validate().is_ok());

        let mut blank_vest = valid_new_sale();
        blank_vest.vest_id = String::new();
        assert!(blank_vest.validate().is_err());
    }

    #[test]
    fn wire_field_names_match_the_export_contract() {
        let grant = Grant {
            grant_id: "G1".to_string(),
            grant_date: date(2022, 9, 1),
            symbol: "ACME".to_string(),
            num_stocks: 400,
            vests: vec![Vest {
                vest_id: "V1".to_string(),
                vest_date: date(2023, 1, 1),
                shares_vested: 100,
                vest_price: dec!(10),
                tax_rate_vest: dec!(0.20),
                tax_at_vest: None,
            }],
            sales: vec![],
        };
        let json = serde_json::to_value(&grant).unwrap();
        assert_eq!(json["grant_id"], "G1");
        assert_eq!(json["grant_date"], "2022-09-01");
        assert_eq!(json["num_stocks"], 400);
        assert_eq!(json["vests"][0]["vest_id"], "V1");
        assert_eq!(json["vests"][0]["vest_date"], "2023-01-01");
        assert_eq!(json["vests"][0]["shares_vested"], 100);
        // Absent derived caches stay off the wire entirely.
        assert!(json["vests"][0].get("tax_at_vest").is_none());
    }

    #[test]
    fn derived_caches_serialize_when_present() {
        let vest = Vest {
            vest_id: "V1".to_string(),
            vest_date: date(2023, 1, 1),
            shares_vested: 100,
            vest_price: dec!(10),
            tax_rate_vest: dec!(0.20),
            tax_at_vest: Some(dec!(200)),
        };
        let json = serde_json::to_value(&vest).unwrap();
        assert_eq!(json["tax_at_vest"], serde_json::json!(200.0));
    }

    #[test]
    fn vest_and_sale_lookups_resolve_by_id() {
        let grant = Grant {
            grant_id: "G1".to_string(),
            grant_date: date(2022, 9, 1),
            symbol: "ACME".to_string(),
            num_stocks: 400,
            vests: vec![Vest {
                vest_id: "V1".to_string(),
                vest_date: date(2023, 1, 1),
                shares_vested: 100,
                vest_price: dec!(10),
                tax_rate_vest: dec!(0.20),
                tax_at_vest: None,
            }],
            sales: vec![Sale {
                sale_id: "S1".to_string(),
                vest_id: "V1".to_string(),
                sale_date: date(2024, 2, 5),
                shares_sold: 50,
                sale_price: dec!(15),
                tax_rate_sale: dec!(0.20),
                capital_gains: None,
                tax_at_sale: None,
            }],
        };
        assert!(grant.find_vest("V1").is_some());
        assert!(grant.find_vest("V2").is_none());
        assert!(grant.find_sale("S1").is_some());
        assert!(grant.find_sale("S2").is_none());
    }
}
