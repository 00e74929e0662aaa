use super::{pick, unknown_field, Control, FieldInput, SectionEditor};
use crate::editor::coerce;
use crate::editor::patch::{CreditsPatch, SectionKey};
use crate::editor::schema::{CreditsSection, Currency, MonetizationType};
use crate::error::CoreError;
use crate::types::Locale;

pub struct CreditsEditor;

impl SectionEditor for CreditsEditor {
    type Section = CreditsSection;
    type Patch = CreditsPatch;

    const KEY: SectionKey = SectionKey::Credits;

    fn controls(section: &CreditsSection, locale: Locale) -> Vec<Control> {
        vec![
            Control::number(
                "freeChats",
                pick(locale, "무료 채팅 (구독 필요)", "Free chats (subscription required)"),
                section.free_chats.map_or(serde_json::Value::Null, Into::into),
                Some(0.0),
                None,
                1.0,
                pick(locale, "예: 10", "e.g. 10"),
            )
            .with_help(pick(locale, "비워두면 무제한", "Leave empty for unlimited")),
            Control::checkbox(
                "resetFreeChatsMonthly",
                pick(locale, "매월 무료 채팅 재설정 (구독 필요)", "Reset free chats monthly (subscription required)"),
                section.reset_free_chats_monthly,
            ),
            Control::checkbox(
                "disablePayments",
                pick(locale, "결제 비활성화 (구독 필요)", "Disable payments (subscription required)"),
                section.disable_payments,
            ),
            Control::select(
                "monetizationType",
                pick(locale, "수익화 유형", "Monetization type"),
                section.monetization_type.as_str(),
                choice_options!(MonetizationType, locale),
            ),
            Control::select(
                "currency",
                pick(locale, "통화", "Currency"),
                section.currency.as_str(),
                choice_options!(Currency, locale),
            ),
            Control::number(
                "price",
                pick(locale, "가격", "Price"),
                section.price.into(),
                Some(0.0),
                None,
                0.01,
                "1.00",
            ),
            Control::number(
                "chatsForPrice",
                pick(locale, "가격당 채팅 수", "Chats per price"),
                section.chats_for_price.into(),
                Some(1.0),
                None,
                1.0,
                "1",
            ),
        ]
    }

    fn edit(_section: &CreditsSection, field: &str, input: &FieldInput) -> Result<CreditsPatch, CoreError> {
        let mut patch = CreditsPatch::default();
        match field {
            "freeChats" => patch.free_chats = Some(coerce::free_chats(&input.text(field)?)),
            "resetFreeChatsMonthly" => patch.reset_free_chats_monthly = Some(input.checked(field)?),
            "disablePayments" => patch.disable_payments = Some(input.checked(field)?),
            "monetizationType" => patch.monetization_type = Some(input.text(field)?.parse()?),
            "currency" => patch.currency = Some(input.text(field)?.parse()?),
            "price" => patch.price = Some(coerce::price(&input.text(field)?)),
            "chatsForPrice" => patch.chats_for_price = Some(coerce::chats_for_price(&input.text(field)?)),
            _ => return Err(unknown_field(Self::KEY, field)),
        }
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(field: &str, raw: &str) -> CreditsPatch {
        CreditsEditor::edit(&CreditsSection::default(), field, &FieldInput::Text(raw.into())).unwrap()
    }

    #[test]
    fn invalid_price_becomes_zero() {
        assert_eq!(edit("price", "abc").price, Some(0.0));
        assert_eq!(edit("price", "4.99").price, Some(4.99));
    }

    #[test]
    fn empty_chats_for_price_becomes_one() {
        assert_eq!(edit("chatsForPrice", "").chats_for_price, Some(1));
        assert_eq!(edit("chatsForPrice", "20").chats_for_price, Some(20));
    }

    #[test]
    fn empty_free_chats_unsets() {
        let mut section = CreditsSection::default();
        section.free_chats = Some(5);
        let patch = edit("freeChats", "");
        assert_eq!(patch.free_chats, Some(None));
        assert_eq!(section.apply(&patch).free_chats, None);

        assert_eq!(edit("freeChats", "0").free_chats, Some(Some(0)));
    }

    #[test]
    fn monetization_type_accepts_legacy_label() {
        assert_eq!(edit("monetizationType", "구독").monetization_type, Some(MonetizationType::Subscription));
        assert_eq!(edit("currency", "KRW").currency, Some(Currency::Krw));
    }

    #[test]
    fn free_chats_control_is_null_when_unlimited() {
        let controls = CreditsEditor::controls(&CreditsSection::default(), Locale::En);
        let free = controls.iter().find(|c| c.name == "freeChats").unwrap();
        assert!(free.value.is_null());
        let price = controls.iter().find(|c| c.name == "price").unwrap();
        assert_eq!(price.value, 1.0);
    }
}
