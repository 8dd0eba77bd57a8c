use once_cell::sync::Lazy;
use serde::Serialize;

type GroupTable = &'static [(&'static str, &'static [&'static str])];
type GradeTable = &'static [(&'static str, GroupTable)];

const MATHEMATICS: GradeTable = &[
    (
        "elementary",
        &[
            (
                "number_sense",
                &[
                    "counting",
                    "addition",
                    "subtraction",
                    "multiplication",
                    "division",
                    "fractions",
                    "decimals",
                    "place value",
                ],
            ),
            (
                "geometry",
                &["shapes", "angles", "area", "perimeter", "volume", "symmetry", "transformations"],
            ),
            (
                "measurement",
                &["length", "weight", "time", "money", "temperature", "capacity"],
            ),
            (
                "data_analysis",
                &["graphs", "charts", "statistics", "probability", "patterns"],
            ),
        ],
    ),
    (
        "middle_school",
        &[
            (
                "algebra",
                &["variables", "equations", "inequalities", "functions", "linear relationships"],
            ),
            (
                "geometry",
                &[
                    "angles",
                    "triangles",
                    "circles",
                    "area",
                    "perimeter",
                    "volume",
                    "coordinate plane",
                ],
            ),
            (
                "number_systems",
                &["integers", "rational numbers", "irrational numbers", "exponents"],
            ),
            (
                "statistics",
                &["data collection", "mean", "median", "mode", "probability", "graphs"],
            ),
        ],
    ),
    (
        "high_school",
        &[
            (
                "algebra",
                &["functions", "polynomials", "quadratic equations", "systems of equations"],
            ),
            (
                "geometry",
                &["proofs", "theorems", "trigonometry", "circles", "polygons"],
            ),
            ("calculus", &["limits", "derivatives", "integrals", "applications"]),
            (
                "statistics",
                &["probability", "distributions", "hypothesis testing", "regression"],
            ),
        ],
    ),
];

const SCIENCE: GradeTable = &[
    (
        "elementary",
        &[
            (
                "life_science",
                &["plants", "animals", "ecosystems", "life cycles", "habitats", "adaptations"],
            ),
            (
                "physical_science",
                &["matter", "energy", "forces", "motion", "simple machines", "light", "sound"],
            ),
            (
                "earth_science",
                &["weather", "climate", "rocks", "minerals", "water cycle", "solar system"],
            ),
            (
                "scientific_method",
                &["observation", "hypothesis", "experiment", "conclusion"],
            ),
        ],
    ),
    (
        "middle_school",
        &[
            (
                "life_science",
                &["cells", "genetics", "evolution", "ecosystems", "biodiversity"],
            ),
            (
                "physical_science",
                &["atoms", "molecules", "chemical reactions", "energy", "forces"],
            ),
            (
                "earth_science",
                &["plate tectonics", "weathering", "erosion", "climate change"],
            ),
            (
                "scientific_inquiry",
                &["hypothesis", "variables", "data analysis", "conclusions"],
            ),
        ],
    ),
    (
        "high_school",
        &[
            (
                "biology",
                &["cell biology", "genetics", "evolution", "ecology", "human anatomy"],
            ),
            (
                "chemistry",
                &["atomic structure", "chemical bonding", "reactions", "stoichiometry"],
            ),
            (
                "physics",
                &["mechanics", "energy", "waves", "electricity", "magnetism"],
            ),
            (
                "earth_science",
                &["geology", "meteorology", "astronomy", "oceanography"],
            ),
        ],
    ),
];

const LANGUAGE_ARTS: GradeTable = &[
    (
        "elementary",
        &[
            (
                "reading",
                &["phonics", "comprehension", "vocabulary", "fluency", "literature"],
            ),
            (
                "writing",
                &["sentences", "paragraphs", "narrative", "informative", "opinion"],
            ),
            (
                "grammar",
                &["parts of speech", "punctuation", "capitalization", "spelling"],
            ),
            ("communication", &["speaking", "listening", "presentation"]),
        ],
    ),
    (
        "middle_school",
        &[
            (
                "reading",
                &[
                    "comprehension",
                    "analysis",
                    "inference",
                    "text structure",
                    "literary elements",
                ],
            ),
            (
                "writing",
                &["essays", "research", "argumentative", "narrative", "expository"],
            ),
            (
                "grammar",
                &["sentence structure", "clauses", "agreement", "style"],
            ),
            ("communication", &["debate", "presentation", "collaboration"]),
        ],
    ),
    (
        "high_school",
        &[
            (
                "literature",
                &["analysis", "interpretation", "critical thinking", "literary devices"],
            ),
            (
                "composition",
                &["research papers", "essays", "creative writing", "argumentation"],
            ),
            (
                "grammar",
                &["advanced grammar", "style", "rhetoric", "editing"],
            ),
            (
                "communication",
                &["public speaking", "debate", "media literacy"],
            ),
        ],
    ),
];

const SOCIAL_STUDIES: GradeTable = &[
    (
        "elementary",
        &[
            (
                "history",
                &["communities", "families", "local history", "national symbols"],
            ),
            (
                "geography",
                &["maps", "landforms", "continents", "oceans", "climate"],
            ),
            (
                "civics",
                &["citizenship", "government", "rights", "responsibilities"],
            ),
            (
                "economics",
                &["goods", "services", "money", "trade", "needs", "wants"],
            ),
        ],
    ),
    (
        "middle_school",
        &[
            (
                "history",
                &[
                    "ancient civilizations",
                    "world history",
                    "american history",
                    "historical thinking",
                ],
            ),
            (
                "geography",
                &["physical geography", "human geography", "regions", "culture"],
            ),
            (
                "civics",
                &["democracy", "constitution", "branches of government", "citizenship"],
            ),
            (
                "economics",
                &[
                    "supply and demand",
                    "market economy",
                    "global trade",
                    "personal finance",
                ],
            ),
        ],
    ),
    (
        "high_school",
        &[
            (
                "history",
                &[
                    "world history",
                    "american history",
                    "historical analysis",
                    "primary sources",
                ],
            ),
            (
                "geography",
                &[
                    "human geography",
                    "physical geography",
                    "global issues",
                    "sustainability",
                ],
            ),
            (
                "civics",
                &[
                    "constitutional law",
                    "political systems",
                    "civic engagement",
                    "public policy",
                ],
            ),
            (
                "economics",
                &[
                    "microeconomics",
                    "macroeconomics",
                    "economic systems",
                    "global economy",
                ],
            ),
        ],
    ),
];

const STANDARD_SUBJECTS: &[(&str, GradeTable)] = &[
    ("mathematics", MATHEMATICS),
    ("science", SCIENCE),
    ("language_arts", LANGUAGE_ARTS),
    ("social_studies", SOCIAL_STUDIES),
];

static STANDARD: Lazy<Taxonomy> = Lazy::new(|| Taxonomy::from_table(STANDARD_SUBJECTS));

/// Ordered topics under one topic group (e.g. `number_sense`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicGroup {
    pub name: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeBand {
    pub name: String,
    pub groups: Vec<TopicGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subject {
    pub name: String,
    pub grades: Vec<GradeBand>,
}

impl Subject {
    pub fn leaves(&self) -> impl Iterator<Item = TopicLeaf<'_>> {
        self.grades.iter().flat_map(move |grade| {
            grade.groups.iter().flat_map(move |group| {
                group.topics.iter().map(move |topic| TopicLeaf {
                    subject: &self.name,
                    grade: &grade.name,
                    group: &group.name,
                    topic,
                })
            })
        })
    }

    pub fn topic_count(&self) -> usize {
        self.grades
            .iter()
            .flat_map(|g| g.groups.iter())
            .map(|g| g.topics.len())
            .sum()
    }
}

/// One `(subject, grade band, topic group, topic)` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicLeaf<'a> {
    pub subject: &'a str,
    pub grade: &'a str,
    pub group: &'a str,
    pub topic: &'a str,
}

impl TopicLeaf<'_> {
    /// Reporting key: `grade/group/topic`, e.g. `elementary/number_sense/addition`.
    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.grade, self.group, self.topic)
    }
}

/// Subject -> grade band -> topic group -> topics, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Taxonomy {
    subjects: Vec<Subject>,
}

impl Taxonomy {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// The built-in K-12 taxonomy: mathematics, science, language arts and
    /// social studies across elementary, middle school and high school.
    pub fn standard() -> &'static Taxonomy {
        &STANDARD
    }

    pub fn from_table(table: &[(&str, GradeTable)]) -> Self {
        let subjects = table
            .iter()
            .map(|(subject, grades)| Subject {
                name: subject.to_string(),
                grades: grades
                    .iter()
                    .map(|(grade, groups)| GradeBand {
                        name: grade.to_string(),
                        groups: groups
                            .iter()
                            .map(|(group, topics)| TopicGroup {
                                name: group.to_string(),
                                topics: topics.iter().map(|t| t.to_string()).collect(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Self::new(subjects)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn leaves(&self) -> impl Iterator<Item = TopicLeaf<'_>> {
        self.subjects.iter().flat_map(|s| s.leaves())
    }

    pub fn topic_count(&self) -> usize {
        self.subjects.iter().map(Subject::topic_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_subject_order() {
        let names: Vec<&str> = Taxonomy::standard()
            .subjects()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["mathematics", "science", "language_arts", "social_studies"]
        );
    }

    #[test]
    fn test_standard_topic_counts() {
        let taxonomy = Taxonomy::standard();
        let counts: Vec<usize> = taxonomy.subjects().iter().map(|s| s.topic_count()).collect();
        assert_eq!(counts, vec![65, 59, 49, 51]);
        assert_eq!(taxonomy.topic_count(), 224);
        assert_eq!(taxonomy.leaves().count(), 224);
    }

    #[test]
    fn test_first_leaf_key() {
        let leaf = Taxonomy::standard().leaves().next().unwrap();
        assert_eq!(leaf.subject, "mathematics");
        assert_eq!(leaf.key(), "elementary/number_sense/counting");
    }

    #[test]
    fn test_multi_word_topic_key() {
        let keys: Vec<String> = Taxonomy::standard().leaves().map(|l| l.key()).collect();
        assert!(keys.contains(&"elementary/number_sense/place value".to_string()));
        assert!(keys.contains(&"middle_school/economics/supply and demand".to_string()));
    }

    #[test]
    fn test_empty_subject_has_no_leaves() {
        let taxonomy = Taxonomy::new(vec![Subject {
            name: "art".to_string(),
            grades: vec![],
        }]);
        assert_eq!(taxonomy.topic_count(), 0);
        assert_eq!(taxonomy.leaves().count(), 0);
    }
}
