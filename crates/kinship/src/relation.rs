use crate::{Gender, Person, PersonId};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Collateral relatives whose partners get a derived label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Kin {
    Uncle { depth: u8 },
    SecondUncle,
    Cousin { degree: u8 },
}

impl Kin {
    fn relation(self) -> Relation {
        match self {
            Kin::Uncle { depth } => Relation::Uncle { depth },
            Kin::SecondUncle => Relation::SecondUncle,
            Kin::Cousin { degree } => Relation::Cousin { degree },
        }
    }
}

/// How a person relates to the focus
///
/// Depths count generations away from the focus, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Relation {
    Focus,
    Partner,
    ParentInLaw,
    /// Partner's sibling or sibling's partner
    SiblingInLaw,
    Ancestor { depth: u8 },
    StepParent,
    Sibling,
    Nephew,
    Descendant { depth: u8 },
    DescendantPartner { depth: u8 },
    Uncle { depth: u8 },
    SecondUncle,
    Cousin { degree: u8 },
    PartnerOfKin { kin: Kin, kin_gender: Gender },
    /// Fallback for anyone not reached by a traversal rule
    Relative,
}

fn gendered(gender: Gender, male: &'static str, female: &'static str) -> Cow<'static, str> {
    Cow::Borrowed(match gender {
        Gender::Male => male,
        Gender::Female => female,
    })
}

impl Relation {
    pub fn is_ancestor(&self) -> bool {
        matches!(self, Relation::Ancestor { .. })
    }

    /// Uncles, second uncles and cousins
    pub fn as_kin(&self) -> Option<Kin> {
        match *self {
            Relation::Uncle { depth } => Some(Kin::Uncle { depth }),
            Relation::SecondUncle => Some(Kin::SecondUncle),
            Relation::Cousin { degree } => Some(Kin::Cousin { degree }),
            _ => None,
        }
    }

    /// Display label for a person of the given gender
    pub fn label(&self, gender: Gender) -> Cow<'static, str> {
        use Gender::*;

        match *self {
            Relation::Focus => "Tú".into(),
            Relation::Partner => gendered(gender, "Esposo", "Esposa"),
            Relation::ParentInLaw => gendered(gender, "Suegro", "Suegra"),
            Relation::SiblingInLaw => gendered(gender, "Cuñado", "Cuñada"),
            Relation::Ancestor { depth } => match depth {
                1 => gendered(gender, "Padre", "Madre"),
                2 => gendered(gender, "Abuelo", "Abuela"),
                3 => gendered(gender, "Bisabuelo", "Bisabuela"),
                4 => gendered(gender, "Tatarabuelo", "Tatarabuela"),
                5 => gendered(gender, "Trastatarabuelo", "Trastatarabuela"),
                n => format!("Ancestro (Gen -{n})").into(),
            },
            Relation::StepParent => gendered(gender, "Padrastro", "Madrastra"),
            Relation::Sibling => gendered(gender, "Hermano", "Hermana"),
            Relation::Nephew => gendered(gender, "Sobrino", "Sobrina"),
            Relation::Descendant { depth } => match depth {
                1 => gendered(gender, "Hijo", "Hija"),
                2 => gendered(gender, "Nieto", "Nieta"),
                3 => gendered(gender, "Bisnieto", "Bisnieta"),
                4 => gendered(gender, "Tataranieto", "Tataranieta"),
                n => format!("Descendiente (Gen +{n})").into(),
            },
            Relation::DescendantPartner { depth: 1 } => gendered(gender, "Yerno", "Nuera"),
            Relation::DescendantPartner { .. } => "Pareja".into(),
            Relation::Uncle { depth } => match (depth, gender) {
                (1, _) => gendered(gender, "Tío", "Tía"),
                (2, _) => gendered(gender, "Tío abuelo", "Tía abuela"),
                (3, _) => gendered(gender, "Tío bisabuelo", "Tía bisabuela"),
                (4, _) => gendered(gender, "Tío tatarabuelo", "Tía tatarabuela"),
                (_, Male) => "Tío lejano".into(),
                (_, Female) => "Tía lejana".into(),
            },
            Relation::SecondUncle => gendered(gender, "Tío segundo", "Tía segunda"),
            Relation::Cousin { degree: 1 } => gendered(gender, "Primo", "Prima"),
            Relation::Cousin { .. } => gendered(gender, "Primo segundo", "Prima segunda"),
            Relation::PartnerOfKin { kin, kin_gender } => {
                let kin_label = kin.relation().label(kin_gender).to_lowercase();
                format!("Pareja de {kin_label}").into()
            }
            Relation::Relative => "Pariente".into(),
        }
    }
}

/// A person positioned relative to the focus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub person: Person,
    /// 0 for the focus generation, negative for ancestors
    pub generation: i32,
    pub relation: Relation,
}

impl RenderNode {
    pub fn id(&self) -> &PersonId {
        &self.person.id
    }

    pub fn gender(&self) -> Gender {
        self.person.gender
    }

    pub fn label(&self) -> Cow<'static, str> {
        self.relation.label(self.person.gender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn gendered_labels() {
        assert_eq!(Relation::Partner.label(Gender::Male), "Esposo");
        assert_eq!(Relation::Partner.label(Gender::Female), "Esposa");
        assert_eq!(Relation::Ancestor { depth: 3 }.label(Gender::Female), "Bisabuela");
        assert_eq!(Relation::Uncle { depth: 2 }.label(Gender::Male), "Tío abuelo");
        assert_eq!(Relation::DescendantPartner { depth: 1 }.label(Gender::Female), "Nuera");
        assert_eq!(Relation::DescendantPartner { depth: 2 }.label(Gender::Male), "Pareja");
    }

    #[test]
    fn generic_labels_past_named_depths() {
        assert_eq!(Relation::Ancestor { depth: 6 }.label(Gender::Male), "Ancestro (Gen -6)");
        assert_eq!(Relation::Descendant { depth: 5 }.label(Gender::Female), "Descendiente (Gen +5)");
        assert_eq!(Relation::Uncle { depth: 5 }.label(Gender::Female), "Tía lejana");
    }

    #[test]
    fn partner_of_kin_uses_kin_gender() {
        let relation = Relation::PartnerOfKin {
            kin: Kin::Uncle { depth: 1 },
            kin_gender: Gender::Female,
        };
        assert_eq!(relation.label(Gender::Male), "Pareja de tía");

        let relation = Relation::PartnerOfKin {
            kin: Kin::Cousin { degree: 2 },
            kin_gender: Gender::Male,
        };
        assert_eq!(relation.label(Gender::Female), "Pareja de primo segundo");
    }

    #[test]
    fn kin_maps_back_to_relation() {
        for kin in [Kin::Uncle { depth: 3 }, Kin::SecondUncle, Kin::Cousin { degree: 1 }] {
            assert_eq!(kin.relation().as_kin(), Some(kin));
        }
        assert_eq!(Relation::Sibling.as_kin(), None);
    }
}
