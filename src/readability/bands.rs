/// Textual assessment of a Flesch-Kincaid grade level.
pub fn grade_assessment(grade: f64) -> &'static str {
    if grade <= 5.0 {
        "Appropriate for elementary students"
    } else if grade <= 8.0 {
        "Appropriate for middle school students"
    } else if grade <= 12.0 {
        "Appropriate for high school students"
    } else if grade <= 16.0 {
        "Appropriate for college students"
    } else {
        "Advanced level, suitable for specialized audiences"
    }
}

pub fn reading_ease_assessment(ease: f64) -> &'static str {
    if ease >= 90.0 {
        "Very easy to read"
    } else if ease >= 80.0 {
        "Easy to read"
    } else if ease >= 70.0 {
        "Fairly easy to read"
    } else if ease >= 60.0 {
        "Standard reading level"
    } else if ease >= 50.0 {
        "Fairly difficult to read"
    } else if ease >= 30.0 {
        "Difficult to read"
    } else {
        "Very difficult to read"
    }
}

pub fn complexity_level(grade: f64) -> &'static str {
    if grade <= 5.0 {
        "Elementary (K-5)"
    } else if grade <= 8.0 {
        "Middle School (6-8)"
    } else if grade <= 12.0 {
        "High School (9-12)"
    } else if grade <= 16.0 {
        "College Level"
    } else {
        "Advanced/Professional"
    }
}

pub fn recommended_audience(grade: f64) -> &'static str {
    if grade <= 3.0 {
        "Early elementary students (K-3)"
    } else if grade <= 5.0 {
        "Upper elementary students (4-5)"
    } else if grade <= 8.0 {
        "Middle school students (6-8)"
    } else if grade <= 12.0 {
        "High school students (9-12)"
    } else if grade <= 16.0 {
        "College students and adults"
    } else {
        "Specialized professionals and experts"
    }
}

/// Agreement between grade-level formulas, from the spread `max - min`.
pub fn formula_agreement(grades: &[f64]) -> &'static str {
    if grades.is_empty() {
        return "Insufficient data";
    }
    let max = grades.iter().copied().fold(f64::MIN, f64::max);
    let min = grades.iter().copied().fold(f64::MAX, f64::min);
    let spread = max - min;

    if spread <= 2.0 {
        "High agreement between formulas"
    } else if spread <= 4.0 {
        "Moderate agreement between formulas"
    } else {
        "Low agreement between formulas - content may be complex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_assessment_upper_bounds_inclusive() {
        assert_eq!(grade_assessment(0.0), "Appropriate for elementary students");
        assert_eq!(grade_assessment(5.0), "Appropriate for elementary students");
        assert_eq!(grade_assessment(5.1), "Appropriate for middle school students");
        assert_eq!(grade_assessment(12.0), "Appropriate for high school students");
        assert_eq!(grade_assessment(16.0), "Appropriate for college students");
        assert_eq!(
            grade_assessment(16.1),
            "Advanced level, suitable for specialized audiences"
        );
    }

    #[test]
    fn test_reading_ease_bands() {
        let cases = [
            (100.0, "Very easy to read"),
            (90.0, "Very easy to read"),
            (85.0, "Easy to read"),
            (70.0, "Fairly easy to read"),
            (65.0, "Standard reading level"),
            (50.0, "Fairly difficult to read"),
            (49.9, "Difficult to read"),
            (30.0, "Difficult to read"),
            (29.9, "Very difficult to read"),
            (0.0, "Very difficult to read"),
        ];
        for (ease, label) in cases {
            assert_eq!(reading_ease_assessment(ease), label, "ease {}", ease);
        }
    }

    #[test]
    fn test_complexity_has_no_gaps_between_bands() {
        assert_eq!(complexity_level(5.5), "Middle School (6-8)");
        assert_eq!(complexity_level(12.5), "College Level");
        assert_eq!(complexity_level(20.0), "Advanced/Professional");
    }

    #[test]
    fn test_recommended_audience() {
        assert_eq!(recommended_audience(3.0), "Early elementary students (K-3)");
        assert_eq!(recommended_audience(4.0), "Upper elementary students (4-5)");
        assert_eq!(recommended_audience(7.0), "Middle school students (6-8)");
        assert_eq!(recommended_audience(10.0), "High school students (9-12)");
        assert_eq!(recommended_audience(14.0), "College students and adults");
        assert_eq!(recommended_audience(18.0), "Specialized professionals and experts");
    }

    #[test]
    fn test_formula_agreement() {
        assert_eq!(formula_agreement(&[8.0, 9.0, 10.0]), "High agreement between formulas");
        assert_eq!(formula_agreement(&[8.0, 11.0, 9.0]), "Moderate agreement between formulas");
        assert_eq!(
            formula_agreement(&[2.0, 12.0, 6.0]),
            "Low agreement between formulas - content may be complex"
        );
        assert_eq!(formula_agreement(&[]), "Insufficient data");
    }
}
