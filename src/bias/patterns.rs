use once_cell::sync::Lazy;

use crate::text::PatternSet;

type PatternTable = &'static [(&'static str, &'static [&'static str])];

const GENDER: PatternTable = &[
    (
        "stereotypical_roles",
        &[
            r"\b(boys|girls)\s+(should|must|always)\s+(play|like|enjoy)",
            r"\b(men|women)\s+(naturally|typically)\s+(are|do)",
            r"\b(he|she)\s+(should|must)\s+(be|act|look)",
            r"\b(father|mother)\s+(role|responsibility)",
            r"\b(manly|womanly|feminine|masculine)\s+(traits|qualities)",
        ],
    ),
    (
        "gendered_language",
        &[
            r"\b(he|him|his)\s+(only|always)",
            r"\b(she|her|hers)\s+(only|always)",
            r"\b(man|woman)\s+(as|like)",
            r"\b(guys|gals|boys|girls)\s+(only)",
            r"\b(gentlemen|ladies)\s+(only)",
        ],
    ),
    (
        "occupation_stereotypes",
        &[
            r"\b(male|female)\s+(nurse|doctor|engineer|teacher)",
            r"\b(man|woman)\s+(nurse|doctor|engineer|teacher)",
            r"\b(he|she)\s+(is|was)\s+(a)\s+(nurse|doctor|engineer|teacher)",
        ],
    ),
];

const RACIAL: PatternTable = &[
    (
        "stereotypical_descriptions",
        &[
            r"\b(race|ethnicity)\s+(determines|affects)\s+(intelligence|ability)",
            r"\b(certain|specific)\s+(races|ethnicities)\s+(are|tend|typically)",
            r"\b(racial|ethnic)\s+(characteristics|traits|qualities)",
            r"\b(white|black|asian|hispanic)\s+(people|students)\s+(always|typically)",
        ],
    ),
    (
        "cultural_assumptions",
        &[
            r"\b(they|them)\s+(all|always)\s+(speak|eat|dress)",
            r"\b(their|them)\s+(culture|background)\s+(means|implies)",
            r"\b(foreign|exotic|different)\s+(ways|customs|traditions)",
            r"\b(primitive|advanced)\s+(cultures|societies)",
        ],
    ),
    (
        "exclusionary_language",
        &[
            r"\b(we|our|us)\s+(vs|versus)\s+(they|them|their)",
            r"\b(our|american)\s+(way|culture|values)\s+(vs|versus)",
            r"\b(them|they)\s+(don't|can't|won't)\s+(understand|appreciate)",
        ],
    ),
];

const AGE: PatternTable = &[
    (
        "age_stereotypes",
        &[
            r"\b(young|old)\s+(people|students)\s+(can't|don't|won't)",
            r"\b(age|generation)\s+(determines|affects)\s+(ability|intelligence)",
            r"\b(teenagers|elderly|children)\s+(always|typically|naturally)",
            r"\b(too\s+(young|old))\s+(for|to)",
        ],
    ),
    (
        "generational_assumptions",
        &[
            r"\b(millennials|boomers|gen\s+z)\s+(all|always|typically)",
            r"\b(young|old)\s+(generation)\s+(doesn't|can't)",
            r"\b(modern|traditional)\s+(vs|versus)\s+(old|new)",
        ],
    ),
];

const CULTURAL: PatternTable = &[
    (
        "insensitive_terms",
        &[
            r"\b(oriental|exotic|primitive|savage|uncivilized)",
            r"\b(third\s+world|developing|underdeveloped)",
            r"\b(foreign|alien|strange|weird)\s+(customs|traditions)",
            r"\b(their|them)\s+(kind|type|sort)",
        ],
    ),
    (
        "cultural_misappropriation",
        &[
            r"\b(costume|dress|outfit)\s+(as|like)\s+(native|tribal)",
            r"\b(cultural|traditional)\s+(items|objects)\s+(for|as)\s+(decoration)",
            r"\b(authentic|real)\s+(native|tribal|ethnic)\s+(experience)",
        ],
    ),
    (
        "religious_sensitivity",
        &[
            r"\b(religion|faith)\s+(vs|versus)\s+(science|reason)",
            r"\b(believers|non-believers)\s+(vs|versus)",
            r"\b(religious|spiritual)\s+(vs|versus)\s+(rational|logical)",
        ],
    ),
];

const INCLUSIVE: PatternTable = &[
    (
        "gender_inclusive",
        &[
            r"\b(they|them|their)\s+(as|for)\s+(singular)",
            r"\b(person|individual|student)\s+(instead\s+of)",
            r"\b(people|persons)\s+(instead\s+of)",
            r"\b(professional|expert|specialist)\s+(instead\s+of)",
        ],
    ),
    (
        "culturally_sensitive",
        &[
            r"\b(diverse|inclusive|representative)",
            r"\b(cultural|ethnic|racial)\s+(diversity)",
            r"\b(respectful|respecting)\s+(differences)",
            r"\b(understanding|appreciating)\s+(cultures)",
        ],
    ),
    (
        "age_inclusive",
        &[
            r"\b(all\s+ages|diverse\s+ages)",
            r"\b(age-appropriate|age-inclusive)",
            r"\b(intergenerational|multi-generational)",
            r"\b(accessible|inclusive)\s+(for\s+all)",
        ],
    ),
];

fn compile(name: &str, table: PatternTable) -> PatternSet {
    PatternSet::from_table(name, table).expect("built-in bias patterns compile")
}

pub static GENDER_BIAS: Lazy<PatternSet> = Lazy::new(|| compile("gender", GENDER));
pub static RACIAL_BIAS: Lazy<PatternSet> = Lazy::new(|| compile("racial", RACIAL));
pub static AGE_BIAS: Lazy<PatternSet> = Lazy::new(|| compile("age", AGE));
pub static CULTURAL_SENSITIVITY: Lazy<PatternSet> = Lazy::new(|| compile("cultural", CULTURAL));
pub static INCLUSIVE_LANGUAGE: Lazy<PatternSet> = Lazy::new(|| compile("inclusive", INCLUSIVE));
