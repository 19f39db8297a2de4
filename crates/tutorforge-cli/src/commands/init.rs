//! The `tutorforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create tutorforge.toml
    if std::path::Path::new("tutorforge.toml").exists() {
        println!("tutorforge.toml already exists, skipping.");
    } else {
        std::fs::write("tutorforge.toml", SAMPLE_CONFIG)?;
        println!("Created tutorforge.toml");
    }

    // Create a sample question bank
    if std::path::Path::new("questions.csv").exists() {
        println!("questions.csv already exists, skipping.");
    } else {
        std::fs::write("questions.csv", SAMPLE_QUESTIONS)?;
        println!("Created questions.csv");
    }

    println!("\nNext steps:");
    println!("  1. Edit questions.csv with your own material");
    println!("  2. Run: tutorforge validate --questions questions.csv");
    println!("  3. Run: tutorforge run --student student_001");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# tutorforge configuration

data_dir = "./tutor-data"
questions = "questions.csv"
question_count = 5

# Adjustment thresholds
mastery_streak = 3
demotion_streak = 2
weak_area_min_attempts = 3
weak_area_accuracy = 0.6
"#;

const SAMPLE_QUESTIONS: &str = "\
id,question,options,correct_answer,difficulty,topic
alg-001,What is 2 + 2?,3|4|5|6,4,1,algebra
alg-002,What is 7 - 3?,2|3|4|5,4,1,algebra
alg-003,Solve x + 3 = 7,2|3|4|5,4,2,algebra
alg-004,Solve 2x = 10,4|5|6|8,5,2,algebra
alg-005,Solve x^2 = 49 for positive x,5|6|7|8,7,3,algebra
alg-006,Factor x^2 - 9,(x-3)(x+3)|(x-9)(x+1)|(x-3)(x-3),(x-3)(x+3),4,algebra
alg-007,Solve x^2 - 5x + 6 = 0 for the larger root,1|2|3|6,3,5,algebra
geo-001,How many sides does a triangle have?,2|3|4|5,3,1,geometry
geo-002,How many degrees in a right angle?,45|60|90|180,90,1,geometry
geo-003,How many degrees in the angles of a triangle?,90|180|270|360,180,2,geometry
geo-004,What is the area of a 3 by 4 rectangle?,7|12|14|24,12,2,geometry
geo-005,What is the hypotenuse of a 3-4-? right triangle?,5|6|7|8,5,3,geometry
geo-006,How many faces does a cube have?,4|6|8|12,6,3,geometry
geo-007,What is the sum of interior angles of a pentagon?,360|480|540|720,540,4,geometry
fra-001,What is 1/2 + 1/2?,1/4|1/2|1|2,1,1,fractions
fra-002,What is 1/2 of 10?,2|5|10|20,5,1,fractions
fra-003,What is 1/3 + 1/6?,1/2|1/3|2/9|5/6,1/2,2,fractions
fra-004,What is 3/4 - 1/4?,1/4|1/2|3/4|1,1/2,2,fractions
fra-005,What is 2/3 divided by 1/3?,1/2|1|2|3,2,3,fractions
fra-006,What is 5/8 as a decimal?,0.580|0.625|0.650|0.850,0.625,4,fractions
fra-007,What is 7/8 + 5/6 as a fraction in lowest terms?,41/24|12/14|35/48|7/6,41/24,5,fractions
";
