//! Built-in exercise library.
//!
//! The catalog ships with the client rather than coming from the backend,
//! so browsing and search work offline and need no authentication.

use crate::models::Exercise;
use crate::utils::contains_ignore_case;

/// The full catalog. Kept alphabetical within each muscle group.
static CATALOG: &[Exercise] = &[
    Exercise {
        id: 1,
        name: "Bench Press",
        muscle: "Chest",
        difficulty: "Intermediate",
        equipment: "Barbell, Bench",
        instructions: &[
            "Lie flat on the bench with feet planted on the ground",
            "Grip the barbell slightly wider than shoulder width",
            "Lower the bar slowly to mid-chest level",
            "Press the bar back up, keeping elbows tucked at about 45 degrees",
        ],
    },
    Exercise {
        id: 2,
        name: "Dumbbell Flyes",
        muscle: "Chest",
        difficulty: "Intermediate",
        equipment: "Dumbbells, Bench",
        instructions: &[
            "Lie flat holding dumbbells above your chest, palms facing each other",
            "Keep a slight bend in the elbows throughout",
            "Lower the weights in a wide arc until your chest is stretched",
            "Squeeze the chest to bring the weights back up",
        ],
    },
    Exercise {
        id: 3,
        name: "Lat Pulldown",
        muscle: "Back",
        difficulty: "Beginner",
        equipment: "Cable Machine",
        instructions: &[
            "Sit with thighs secured under the pad",
            "Grasp the bar with a wide grip",
            "Pull the bar down to your upper chest while squeezing the lats",
            "Control the bar back to the starting position",
        ],
    },
    Exercise {
        id: 4,
        name: "Barbell Rows",
        muscle: "Back",
        difficulty: "Intermediate",
        equipment: "Barbell",
        instructions: &[
            "Hinge at the hips with a flat back, bar hanging at arm's length",
            "Pull the bar to your lower ribcage",
            "Squeeze the shoulder blades together at the top",
            "Lower under control",
        ],
    },
    Exercise {
        id: 5,
        name: "Squats",
        muscle: "Legs",
        difficulty: "Intermediate",
        equipment: "Barbell, Rack",
        instructions: &[
            "Set the bar across your upper back and brace your core",
            "Sit down between your hips, knees tracking over toes",
            "Descend until thighs are at least parallel",
            "Drive through the whole foot to stand",
        ],
    },
    Exercise {
        id: 6,
        name: "Romanian Deadlift",
        muscle: "Legs",
        difficulty: "Intermediate",
        equipment: "Barbell",
        instructions: &[
            "Hold the bar at hip height with a shoulder-width grip",
            "Push the hips back, lowering the bar along your legs",
            "Keep a soft knee bend and a flat back",
            "Stand by driving the hips forward",
        ],
    },
    Exercise {
        id: 7,
        name: "Overhead Press",
        muscle: "Shoulders",
        difficulty: "Intermediate",
        equipment: "Barbell",
        instructions: &[
            "Start with the bar at shoulder height, forearms vertical",
            "Brace and press the bar overhead",
            "Move your head through once the bar passes your face",
            "Lower under control to the shoulders",
        ],
    },
    Exercise {
        id: 8,
        name: "Lateral Raises",
        muscle: "Shoulders",
        difficulty: "Beginner",
        equipment: "Dumbbells",
        instructions: &[
            "Stand holding dumbbells at your sides",
            "Raise the arms out to shoulder height with a slight elbow bend",
            "Pause briefly at the top",
            "Lower slowly",
        ],
    },
    Exercise {
        id: 9,
        name: "Bicep Curls",
        muscle: "Arms",
        difficulty: "Beginner",
        equipment: "Dumbbells",
        instructions: &[
            "Stand with dumbbells at your sides, palms forward",
            "Curl the weights up without swinging the torso",
            "Squeeze at the top",
            "Lower under control",
        ],
    },
    Exercise {
        id: 10,
        name: "Tricep Pushdowns",
        muscle: "Arms",
        difficulty: "Beginner",
        equipment: "Cable Machine",
        instructions: &[
            "Grip the bar with elbows pinned to your sides",
            "Push the bar down until arms are fully extended",
            "Keep the shoulders still throughout",
            "Return under control",
        ],
    },
    Exercise {
        id: 11,
        name: "Plank",
        muscle: "Core",
        difficulty: "Beginner",
        equipment: "None",
        instructions: &[
            "Support yourself on forearms and toes",
            "Keep a straight line from head to heels",
            "Brace the core and breathe steadily",
            "Hold for the target time",
        ],
    },
    Exercise {
        id: 12,
        name: "Russian Twists",
        muscle: "Core",
        difficulty: "Intermediate",
        equipment: "Weight (Optional)",
        instructions: &[
            "Sit with knees bent and heels lightly touching the floor",
            "Lean back slightly with a straight spine",
            "Rotate the torso side to side, touching the floor beside each hip",
            "Keep the movement slow and controlled",
        ],
    },
    Exercise {
        id: 13,
        name: "Burpees",
        muscle: "Full Body",
        difficulty: "Advanced",
        equipment: "None",
        instructions: &[
            "From standing, drop into a squat and place hands on the floor",
            "Kick the feet back into a push-up position",
            "Perform a push-up, then jump the feet back in",
            "Explode upward into a jump",
        ],
    },
    Exercise {
        id: 14,
        name: "Kettlebell Swing",
        muscle: "Full Body",
        difficulty: "Intermediate",
        equipment: "Kettlebell",
        instructions: &[
            "Hinge at the hips with the kettlebell between your legs",
            "Snap the hips forward to swing the bell to chest height",
            "Let the bell fall back through the legs",
            "Keep the back flat and arms relaxed throughout",
        ],
    },
];

/// All catalog entries.
pub fn all() -> &'static [Exercise] {
    CATALOG
}

/// Look up a single exercise by id.
pub fn by_id(id: u32) -> Option<&'static Exercise> {
    CATALOG.iter().find(|e| e.id == id)
}

/// Case-insensitive search over name, muscle group, and equipment.
pub fn search(query: &str) -> Vec<&'static Exercise> {
    let query = query.trim();
    if query.is_empty() {
        return CATALOG.iter().collect();
    }
    CATALOG
        .iter()
        .filter(|e| {
            contains_ignore_case(e.name, query)
                || contains_ignore_case(e.muscle, query)
                || contains_ignore_case(e.equipment, query)
        })
        .collect()
}

/// All entries for one muscle group (case-insensitive exact match).
pub fn by_muscle(group: &str) -> Vec<&'static Exercise> {
    CATALOG
        .iter()
        .filter(|e| e.muscle.eq_ignore_ascii_case(group.trim()))
        .collect()
}

/// Distinct muscle groups in catalog order.
pub fn muscle_groups() -> Vec<&'static str> {
    let mut groups: Vec<&'static str> = Vec::new();
    for exercise in CATALOG {
        if !groups.contains(&exercise.muscle) {
            groups.push(exercise.muscle);
        }
    }
    groups
}
