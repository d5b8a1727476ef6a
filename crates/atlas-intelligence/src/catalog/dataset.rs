// ABOUTME: Built-in exercise and meal dataset used when no catalog file is configured
// ABOUTME: Static seed tables converted into CatalogItem records at load time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use atlas_core::models::{CatalogItem, ItemCategory, Macros};

// ============================================================================
// Exercise Data
// ============================================================================

struct ExerciseSeed {
    id: &'static str,
    name: &'static str,
    tags: &'static [&'static str],
    difficulty: f64,
    equipment: &'static [&'static str],
    synonyms: &'static [&'static str],
    contraindications: &'static [&'static str],
    description: &'static str,
}

const EXERCISES: &[ExerciseSeed] = &[
    // Push
    ExerciseSeed {
        id: "push-up",
        name: "Push-Up",
        tags: &["chest", "arms", "push", "compound", "strength", "muscle-gain"],
        difficulty: 3.0,
        equipment: &[],
        synonyms: &["pushup", "press-up"],
        contraindications: &["wrist"],
        description: "Hands under shoulders, body in a straight line, lower the chest to the floor and press back up.",
    },
    ExerciseSeed {
        id: "incline-push-up",
        name: "Incline Push-Up",
        tags: &["chest", "push", "strength", "maintenance"],
        difficulty: 2.0,
        equipment: &[],
        synonyms: &["incline pushup"],
        contraindications: &["wrist"],
        description: "Push-up with hands raised on a bench or counter to reduce the load.",
    },
    ExerciseSeed {
        id: "bench-press",
        name: "Bench Press",
        tags: &["chest", "push", "compound", "strength", "muscle-gain"],
        difficulty: 5.0,
        equipment: &["barbell", "bench"],
        synonyms: &["barbell bench"],
        contraindications: &["shoulder"],
        description: "Lie on a flat bench, lower the bar to mid-chest and press to lockout.",
    },
    ExerciseSeed {
        id: "dumbbell-bench-press",
        name: "Dumbbell Bench Press",
        tags: &["chest", "push", "hypertrophy", "muscle-gain"],
        difficulty: 4.0,
        equipment: &["dumbbell", "bench"],
        synonyms: &["db bench"],
        contraindications: &["shoulder"],
        description: "Press a pair of dumbbells from chest height while lying on a bench.",
    },
    ExerciseSeed {
        id: "overhead-press",
        name: "Overhead Press",
        tags: &["shoulders", "push", "compound", "strength"],
        difficulty: 6.0,
        equipment: &["barbell"],
        synonyms: &["ohp", "military press", "shoulder press"],
        contraindications: &["shoulder", "back"],
        description: "Press the bar from the front rack to overhead while bracing the trunk.",
    },
    ExerciseSeed {
        id: "pike-push-up",
        name: "Pike Push-Up",
        tags: &["shoulders", "push", "strength", "muscle-gain"],
        difficulty: 5.0,
        equipment: &[],
        synonyms: &["pike pushup"],
        contraindications: &["wrist", "shoulder"],
        description: "Hips high in an inverted V, bend the elbows to bring the head toward the floor.",
    },
    ExerciseSeed {
        id: "bench-dip",
        name: "Bench Dip",
        tags: &["arms", "push", "muscle-gain"],
        difficulty: 3.0,
        equipment: &[],
        synonyms: &["tricep dip", "dips"],
        contraindications: &["shoulder"],
        description: "Hands on a chair or bench behind you, lower the hips by bending the elbows.",
    },
    ExerciseSeed {
        id: "lateral-raise",
        name: "Dumbbell Lateral Raise",
        tags: &["shoulders", "push", "isolation", "hypertrophy", "muscle-gain"],
        difficulty: 3.0,
        equipment: &["dumbbell"],
        synonyms: &["side raise"],
        contraindications: &["shoulder"],
        description: "Raise the dumbbells out to the sides until the arms are parallel to the floor.",
    },
    // Pull
    ExerciseSeed {
        id: "pull-up",
        name: "Pull-Up",
        tags: &["back", "arms", "pull", "compound", "strength", "muscle-gain"],
        difficulty: 7.0,
        equipment: &["pull-up-bar"],
        synonyms: &["pullup", "chin-up", "chin up"],
        contraindications: &["shoulder"],
        description: "Hang from the bar and pull until the chin clears it.",
    },
    ExerciseSeed {
        id: "inverted-row",
        name: "Inverted Row",
        tags: &["back", "pull", "strength"],
        difficulty: 4.0,
        equipment: &[],
        synonyms: &["bodyweight row", "australian pull-up"],
        contraindications: &[],
        description: "Lie under a sturdy table edge and row the chest up to it.",
    },
    ExerciseSeed {
        id: "barbell-row",
        name: "Barbell Row",
        tags: &["back", "pull", "compound", "strength", "muscle-gain"],
        difficulty: 5.0,
        equipment: &["barbell"],
        synonyms: &["bent over row", "bent-over row"],
        contraindications: &["back"],
        description: "Hinge forward with a flat back and row the bar to the lower ribs.",
    },
    ExerciseSeed {
        id: "dumbbell-row",
        name: "Dumbbell Row",
        tags: &["back", "pull", "hypertrophy", "muscle-gain"],
        difficulty: 3.0,
        equipment: &["dumbbell"],
        synonyms: &["one arm row", "single arm row"],
        contraindications: &[],
        description: "Support one hand on a bench and row the dumbbell to the hip.",
    },
    ExerciseSeed {
        id: "lat-pulldown",
        name: "Lat Pulldown",
        tags: &["back", "pull", "hypertrophy", "muscle-gain"],
        difficulty: 3.0,
        equipment: &["cable-machine"],
        synonyms: &["pulldown"],
        contraindications: &[],
        description: "Pull the bar down to the upper chest keeping the torso tall.",
    },
    ExerciseSeed {
        id: "bicep-curl",
        name: "Bicep Curl",
        tags: &["arms", "pull", "isolation", "hypertrophy", "muscle-gain"],
        difficulty: 2.0,
        equipment: &["dumbbell"],
        synonyms: &["biceps curl", "curls"],
        contraindications: &[],
        description: "Curl the dumbbells to the shoulders without swinging the torso.",
    },
    ExerciseSeed {
        id: "superman-hold",
        name: "Superman Hold",
        tags: &["back", "core", "pull", "mobility", "maintenance"],
        difficulty: 1.0,
        equipment: &[],
        synonyms: &["superman"],
        contraindications: &[],
        description: "Lie face down and lift arms and legs a few centimetres off the floor.",
    },
    ExerciseSeed {
        id: "reverse-snow-angel",
        name: "Reverse Snow Angel",
        tags: &["back", "shoulders", "pull", "mobility"],
        difficulty: 2.0,
        equipment: &[],
        synonyms: &["snow angel"],
        contraindications: &[],
        description: "Face down, sweep the arms from the hips to overhead while keeping them off the floor.",
    },
    ExerciseSeed {
        id: "band-pull-apart",
        name: "Band Pull-Apart",
        tags: &["back", "shoulders", "pull", "mobility", "maintenance"],
        difficulty: 1.0,
        equipment: &["resistance-band"],
        synonyms: &["pull apart"],
        contraindications: &[],
        description: "Hold a band at shoulder height and pull it apart by squeezing the shoulder blades.",
    },
    // Legs
    ExerciseSeed {
        id: "bodyweight-squat",
        name: "Bodyweight Squat",
        tags: &["legs", "glutes", "squat", "strength", "maintenance"],
        difficulty: 2.0,
        equipment: &[],
        synonyms: &["air squat"],
        contraindications: &["knee"],
        description: "Feet shoulder-width apart, sit the hips back and down, then stand tall.",
    },
    ExerciseSeed {
        id: "back-squat",
        name: "Back Squat",
        tags: &["legs", "glutes", "squat", "compound", "strength", "muscle-gain"],
        difficulty: 7.0,
        equipment: &["barbell", "squat-rack"],
        synonyms: &["barbell squat"],
        contraindications: &["knee", "back"],
        description: "Bar across the upper back, squat to depth and drive up through the mid-foot.",
    },
    ExerciseSeed {
        id: "goblet-squat",
        name: "Goblet Squat",
        tags: &["legs", "glutes", "squat", "compound", "muscle-gain"],
        difficulty: 4.0,
        equipment: &["dumbbell"],
        synonyms: &[],
        contraindications: &["knee"],
        description: "Hold a dumbbell at the chest and squat between the knees.",
    },
    ExerciseSeed {
        id: "walking-lunge",
        name: "Walking Lunge",
        tags: &["legs", "glutes", "lunge", "weight-loss", "endurance"],
        difficulty: 3.0,
        equipment: &[],
        synonyms: &["lunge walk"],
        contraindications: &["knee"],
        description: "Step forward into a lunge, drop the back knee, then step through to the next rep.",
    },
    ExerciseSeed {
        id: "glute-bridge",
        name: "Glute Bridge",
        tags: &["glutes", "legs", "hinge", "mobility", "maintenance"],
        difficulty: 1.0,
        equipment: &[],
        synonyms: &["hip bridge"],
        contraindications: &[],
        description: "Lie on your back with knees bent and drive the hips up by squeezing the glutes.",
    },
    ExerciseSeed {
        id: "clamshell",
        name: "Clamshell",
        tags: &["glutes", "legs", "mobility", "maintenance"],
        difficulty: 1.0,
        equipment: &[],
        synonyms: &["clam"],
        contraindications: &[],
        description: "Side-lying with knees bent, open the top knee while keeping the feet together.",
    },
    ExerciseSeed {
        id: "romanian-deadlift",
        name: "Romanian Deadlift",
        tags: &["legs", "glutes", "hinge", "compound", "strength", "muscle-gain"],
        difficulty: 6.0,
        equipment: &["barbell"],
        synonyms: &["rdl"],
        contraindications: &["back"],
        description: "Soft knees, push the hips back until the hamstrings load, then stand up.",
    },
    ExerciseSeed {
        id: "deadlift",
        name: "Deadlift",
        tags: &["back", "legs", "glutes", "hinge", "compound", "full-body", "strength", "muscle-gain"],
        difficulty: 8.0,
        equipment: &["barbell"],
        synonyms: &["conventional deadlift"],
        contraindications: &["back"],
        description: "Pull the bar from the floor to standing with a neutral spine.",
    },
    ExerciseSeed {
        id: "step-up",
        name: "Step-Up",
        tags: &["legs", "glutes", "lunge", "endurance", "weight-loss"],
        difficulty: 2.0,
        equipment: &[],
        synonyms: &["box step-up"],
        contraindications: &["knee"],
        description: "Step onto a sturdy box or stair and drive through the front heel.",
    },
    ExerciseSeed {
        id: "calf-raise",
        name: "Calf Raise",
        tags: &["legs", "isolation", "endurance"],
        difficulty: 1.0,
        equipment: &[],
        synonyms: &["heel raise"],
        contraindications: &[],
        description: "Rise onto the balls of the feet and lower slowly.",
    },
    ExerciseSeed {
        id: "wall-sit",
        name: "Wall Sit",
        tags: &["legs", "isometric", "endurance"],
        difficulty: 2.0,
        equipment: &[],
        synonyms: &["wall squat"],
        contraindications: &["knee"],
        description: "Back against a wall, hold the thighs parallel to the floor.",
    },
    ExerciseSeed {
        id: "leg-press",
        name: "Leg Press",
        tags: &["legs", "glutes", "hypertrophy", "muscle-gain"],
        difficulty: 4.0,
        equipment: &["leg-press-machine"],
        synonyms: &[],
        contraindications: &["knee"],
        description: "Press the sled away with the whole foot, stopping short of locking the knees.",
    },
    // Core
    ExerciseSeed {
        id: "plank",
        name: "Plank",
        tags: &["core", "isometric", "endurance", "maintenance"],
        difficulty: 2.0,
        equipment: &[],
        synonyms: &["forearm plank"],
        contraindications: &[],
        description: "Hold a straight line from head to heels on the forearms.",
    },
    ExerciseSeed {
        id: "dead-bug",
        name: "Dead Bug",
        tags: &["core", "mobility", "maintenance"],
        difficulty: 1.0,
        equipment: &[],
        synonyms: &["deadbug"],
        contraindications: &[],
        description: "On your back, extend opposite arm and leg while keeping the lower back down.",
    },
    ExerciseSeed {
        id: "hanging-leg-raise",
        name: "Hanging Leg Raise",
        tags: &["core", "strength"],
        difficulty: 6.0,
        equipment: &["pull-up-bar"],
        synonyms: &["leg raise"],
        contraindications: &["shoulder"],
        description: "Hang from a bar and raise straight legs to hip height.",
    },
    ExerciseSeed {
        id: "russian-twist",
        name: "Russian Twist",
        tags: &["core", "endurance"],
        difficulty: 3.0,
        equipment: &[],
        synonyms: &[],
        contraindications: &["back"],
        description: "Seated with feet light on the floor, rotate the torso side to side.",
    },
    // Conditioning
    ExerciseSeed {
        id: "burpee",
        name: "Burpee",
        tags: &["full-body", "cardio", "hiit", "plyometric", "conditioning", "weight-loss", "endurance"],
        difficulty: 6.0,
        equipment: &[],
        synonyms: &[],
        contraindications: &["knee", "wrist"],
        description: "Squat, kick back to a plank, return, and jump.",
    },
    ExerciseSeed {
        id: "jumping-jack",
        name: "Jumping Jack",
        tags: &["full-body", "cardio", "conditioning", "weight-loss", "endurance"],
        difficulty: 1.0,
        equipment: &[],
        synonyms: &["star jump"],
        contraindications: &["knee"],
        description: "Jump the feet wide while raising the arms overhead, then return.",
    },
    ExerciseSeed {
        id: "mountain-climber",
        name: "Mountain Climber",
        tags: &["core", "cardio", "hiit", "conditioning", "weight-loss"],
        difficulty: 4.0,
        equipment: &[],
        synonyms: &[],
        contraindications: &["wrist"],
        description: "From a high plank, drive the knees toward the chest alternately at pace.",
    },
    ExerciseSeed {
        id: "high-knees",
        name: "High Knees",
        tags: &["cardio", "hiit", "conditioning", "weight-loss"],
        difficulty: 2.0,
        equipment: &[],
        synonyms: &[],
        contraindications: &["knee"],
        description: "Run on the spot lifting the knees to hip height.",
    },
    ExerciseSeed {
        id: "jump-squat",
        name: "Jump Squat",
        tags: &["legs", "squat", "plyometric", "hiit", "weight-loss"],
        difficulty: 5.0,
        equipment: &[],
        synonyms: &["squat jump"],
        contraindications: &["knee"],
        description: "Squat down and explode into a jump, landing softly.",
    },
    ExerciseSeed {
        id: "bear-crawl",
        name: "Bear Crawl",
        tags: &["full-body", "core", "conditioning", "endurance"],
        difficulty: 3.0,
        equipment: &[],
        synonyms: &[],
        contraindications: &["wrist"],
        description: "On hands and toes with knees hovering, crawl forward with opposite limbs.",
    },
    ExerciseSeed {
        id: "jump-rope",
        name: "Jump Rope",
        tags: &["cardio", "conditioning", "endurance", "weight-loss"],
        difficulty: 3.0,
        equipment: &["jump-rope"],
        synonyms: &["skipping", "skipping rope"],
        contraindications: &["knee"],
        description: "Continuous skipping with small, quick bounces.",
    },
    ExerciseSeed {
        id: "rowing-intervals",
        name: "Rowing Machine Intervals",
        tags: &["full-body", "cardio", "conditioning", "endurance"],
        difficulty: 5.0,
        equipment: &["rowing-machine"],
        synonyms: &["rowing", "rower"],
        contraindications: &["back"],
        description: "Alternate hard and easy rowing efforts.",
    },
    ExerciseSeed {
        id: "kettlebell-swing",
        name: "Kettlebell Swing",
        tags: &["full-body", "hinge", "hiit", "conditioning", "weight-loss"],
        difficulty: 5.0,
        equipment: &["kettlebell"],
        synonyms: &["kb swing"],
        contraindications: &["back"],
        description: "Hinge and snap the hips to swing the bell to chest height.",
    },
    ExerciseSeed {
        id: "dumbbell-thruster",
        name: "Dumbbell Thruster",
        tags: &["full-body", "squat", "push", "compound", "hiit", "weight-loss"],
        difficulty: 6.0,
        equipment: &["dumbbell"],
        synonyms: &["thruster"],
        contraindications: &["knee", "shoulder"],
        description: "Front squat the dumbbells and press them overhead in one movement.",
    },
    ExerciseSeed {
        id: "brisk-walk",
        name: "Brisk Walk",
        tags: &["cardio", "endurance", "maintenance", "weight-loss"],
        difficulty: 1.0,
        equipment: &[],
        synonyms: &["walking", "walk"],
        contraindications: &[],
        description: "Walk at a pace where talking is possible but singing is not.",
    },
    ExerciseSeed {
        id: "easy-run",
        name: "Easy Run",
        tags: &["cardio", "legs", "endurance"],
        difficulty: 4.0,
        equipment: &[],
        synonyms: &["running", "jogging", "jog"],
        contraindications: &["knee"],
        description: "Conversational-pace run.",
    },
    ExerciseSeed {
        id: "steady-cycling",
        name: "Steady Cycling",
        tags: &["cardio", "legs", "endurance"],
        difficulty: 3.0,
        equipment: &["bike"],
        synonyms: &["cycling", "biking", "spin"],
        contraindications: &[],
        description: "Steady aerobic ride on a road or stationary bike.",
    },
    // Mobility
    ExerciseSeed {
        id: "cat-cow",
        name: "Cat-Cow",
        tags: &["back", "mobility", "maintenance"],
        difficulty: 1.0,
        equipment: &[],
        synonyms: &["cat cow stretch"],
        contraindications: &[],
        description: "On hands and knees, alternate rounding and arching the spine.",
    },
    ExerciseSeed {
        id: "worlds-greatest-stretch",
        name: "World's Greatest Stretch",
        tags: &["full-body", "mobility", "maintenance"],
        difficulty: 2.0,
        equipment: &[],
        synonyms: &["greatest stretch"],
        contraindications: &[],
        description: "Lunge, drop the elbow to the instep, then rotate the arm to the ceiling.",
    },
    ExerciseSeed {
        id: "inchworm",
        name: "Inchworm",
        tags: &["full-body", "core", "mobility", "maintenance"],
        difficulty: 2.0,
        equipment: &[],
        synonyms: &[],
        contraindications: &["wrist"],
        description: "Fold forward, walk the hands out to a plank, then walk them back.",
    },
];

// ============================================================================
// Meal Data
// ============================================================================

struct MealSeed {
    id: &'static str,
    name: &'static str,
    tags: &'static [&'static str],
    // calories, protein, carbs, fat
    macros: (f64, f64, f64, f64),
    synonyms: &'static [&'static str],
    description: &'static str,
}

const MEALS: &[MealSeed] = &[
    // Breakfast
    MealSeed {
        id: "greek-yogurt-parfait",
        name: "Greek Yogurt Parfait",
        tags: &["breakfast", "dairy", "vegetarian", "gluten-free", "balanced"],
        macros: (320.0, 22.0, 38.0, 6.0),
        synonyms: &["yogurt", "parfait"],
        description: "Greek yogurt layered with berries and a handful of granola.",
    },
    MealSeed {
        id: "overnight-oats",
        name: "Overnight Oats",
        tags: &["breakfast", "oats", "vegetarian", "high-fiber", "endurance"],
        macros: (380.0, 14.0, 58.0, 10.0),
        synonyms: &["oatmeal", "porridge"],
        description: "Rolled oats soaked overnight in milk with chia and banana.",
    },
    MealSeed {
        id: "veggie-omelette",
        name: "Vegetable Omelette",
        tags: &["breakfast", "eggs", "vegetarian", "gluten-free"],
        macros: (290.0, 21.0, 8.0, 19.0),
        synonyms: &["omelette", "omelet"],
        description: "Three-egg omelette with spinach, peppers and onion.",
    },
    MealSeed {
        id: "protein-pancakes",
        name: "Protein Pancakes",
        tags: &["breakfast", "eggs", "vegetarian", "muscle-gain"],
        macros: (450.0, 32.0, 48.0, 12.0),
        synonyms: &["pancakes"],
        description: "Oat and egg-white pancakes topped with berries.",
    },
    MealSeed {
        id: "tofu-scramble",
        name: "Tofu Scramble",
        tags: &["breakfast", "vegan", "vegetarian", "gluten-free", "dairy-free"],
        macros: (260.0, 20.0, 10.0, 15.0),
        synonyms: &["scrambled tofu"],
        description: "Crumbled tofu with turmeric, spinach and tomatoes.",
    },
    // Lunch
    MealSeed {
        id: "grilled-chicken-salad",
        name: "Grilled Chicken Salad",
        tags: &["lunch", "chicken", "salad", "gluten-free", "dairy-free", "high-fiber", "weight-loss"],
        macros: (350.0, 35.0, 12.0, 16.0),
        synonyms: &["chicken salad"],
        description: "Grilled chicken breast over mixed greens with olive oil dressing.",
    },
    MealSeed {
        id: "chicken-rice-bowl",
        name: "Chicken and Rice Bowl",
        tags: &["lunch", "dinner", "chicken", "gluten-free", "dairy-free", "muscle-gain"],
        macros: (620.0, 45.0, 70.0, 14.0),
        synonyms: &["chicken rice"],
        description: "Chicken thigh, jasmine rice and steamed broccoli.",
    },
    MealSeed {
        id: "lentil-soup",
        name: "Lentil Soup",
        tags: &["lunch", "legumes", "vegan", "vegetarian", "gluten-free", "dairy-free", "high-fiber"],
        macros: (340.0, 18.0, 52.0, 6.0),
        synonyms: &["lentils"],
        description: "Red lentils simmered with carrot, celery and cumin.",
    },
    MealSeed {
        id: "quinoa-buddha-bowl",
        name: "Quinoa Buddha Bowl",
        tags: &["lunch", "vegan", "vegetarian", "gluten-free", "dairy-free", "balanced", "high-fiber"],
        macros: (520.0, 19.0, 68.0, 18.0),
        synonyms: &["buddha bowl", "quinoa bowl"],
        description: "Quinoa with roasted chickpeas, sweet potato, greens and tahini.",
    },
    MealSeed {
        id: "tuna-wrap",
        name: "Tuna Wrap",
        tags: &["lunch", "fish", "dairy-free", "balanced"],
        macros: (420.0, 30.0, 40.0, 14.0),
        synonyms: &["tuna"],
        description: "Whole-wheat wrap with tuna, lettuce and light mayo.",
    },
    // Dinner
    MealSeed {
        id: "turkey-chili",
        name: "Turkey Chili",
        tags: &["dinner", "turkey", "legumes", "gluten-free", "dairy-free", "high-fiber", "weight-loss"],
        macros: (480.0, 38.0, 40.0, 16.0),
        synonyms: &["chili"],
        description: "Lean ground turkey with kidney beans, tomatoes and spices.",
    },
    MealSeed {
        id: "baked-salmon",
        name: "Baked Salmon with Vegetables",
        tags: &["dinner", "fish", "gluten-free", "dairy-free", "strength"],
        macros: (510.0, 40.0, 14.0, 30.0),
        synonyms: &["salmon"],
        description: "Oven-baked salmon fillet with asparagus and lemon.",
    },
    MealSeed {
        id: "beef-stir-fry",
        name: "Beef Stir-Fry",
        tags: &["dinner", "beef", "dairy-free", "muscle-gain"],
        macros: (580.0, 42.0, 45.0, 22.0),
        synonyms: &["stir fry"],
        description: "Sliced sirloin, mixed vegetables and rice noodles in a ginger sauce.",
    },
    MealSeed {
        id: "chickpea-curry",
        name: "Chickpea Curry",
        tags: &["dinner", "legumes", "vegan", "vegetarian", "gluten-free", "dairy-free", "high-fiber"],
        macros: (490.0, 17.0, 62.0, 18.0),
        synonyms: &["chana masala", "curry"],
        description: "Chickpeas in a tomato and coconut curry with brown rice.",
    },
    MealSeed {
        id: "zucchini-noodles",
        name: "Zucchini Noodles with Pesto",
        tags: &["dinner", "vegetarian", "gluten-free", "weight-loss"],
        macros: (310.0, 9.0, 14.0, 24.0),
        synonyms: &["zoodles"],
        description: "Spiralised zucchini tossed with basil pesto and cherry tomatoes.",
    },
    MealSeed {
        id: "steak-sweet-potato",
        name: "Steak and Sweet Potato",
        tags: &["dinner", "beef", "gluten-free", "dairy-free", "muscle-gain", "strength"],
        macros: (650.0, 48.0, 52.0, 24.0),
        synonyms: &["steak"],
        description: "Grilled sirloin with a baked sweet potato and greens.",
    },
    MealSeed {
        id: "pasta-primavera",
        name: "Pasta Primavera",
        tags: &["dinner", "vegetarian", "endurance", "balanced"],
        macros: (560.0, 18.0, 85.0, 14.0),
        synonyms: &["pasta"],
        description: "Whole-wheat pasta with spring vegetables and parmesan.",
    },
    // Snacks
    MealSeed {
        id: "protein-shake",
        name: "Protein Shake",
        tags: &["snack", "shake", "vegetarian", "gluten-free", "muscle-gain"],
        macros: (200.0, 30.0, 8.0, 4.0),
        synonyms: &["shake", "smoothie"],
        description: "Whey protein blended with milk and ice.",
    },
    MealSeed {
        id: "apple-peanut-butter",
        name: "Apple with Peanut Butter",
        tags: &["snack", "vegan", "vegetarian", "gluten-free", "dairy-free"],
        macros: (270.0, 7.0, 30.0, 16.0),
        synonyms: &["peanut butter"],
        description: "Sliced apple with two tablespoons of peanut butter.",
    },
    MealSeed {
        id: "hummus-veggies",
        name: "Hummus and Veggie Sticks",
        tags: &["snack", "legumes", "vegan", "vegetarian", "gluten-free", "dairy-free", "weight-loss"],
        macros: (180.0, 6.0, 20.0, 9.0),
        synonyms: &["hummus"],
        description: "Carrot, cucumber and pepper sticks with hummus.",
    },
    MealSeed {
        id: "cottage-cheese-berries",
        name: "Cottage Cheese with Berries",
        tags: &["snack", "dairy", "vegetarian", "gluten-free", "weight-loss"],
        macros: (190.0, 24.0, 14.0, 3.0),
        synonyms: &["cottage cheese"],
        description: "Low-fat cottage cheese topped with mixed berries.",
    },
    MealSeed {
        id: "trail-mix",
        name: "Trail Mix",
        tags: &["snack", "vegan", "vegetarian", "gluten-free", "dairy-free", "endurance"],
        macros: (350.0, 10.0, 30.0, 22.0),
        synonyms: &["nuts"],
        description: "Almonds, cashews, raisins and dark chocolate chips.",
    },
    MealSeed {
        id: "edamame",
        name: "Edamame",
        tags: &["snack", "legumes", "vegan", "vegetarian", "gluten-free", "dairy-free"],
        macros: (190.0, 17.0, 14.0, 8.0),
        synonyms: &["soy beans"],
        description: "Steamed edamame pods with sea salt.",
    },
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

/// Build the built-in catalog items, exercises first, in declaration order
pub(super) fn builtin_items() -> Vec<CatalogItem> {
    let exercises = EXERCISES.iter().map(|seed| CatalogItem {
        id: seed.id.to_owned(),
        name: seed.name.to_owned(),
        category: ItemCategory::Exercise,
        tags: seed.tags.iter().map(|t| (*t).to_owned()).collect(),
        difficulty: seed.difficulty,
        equipment: owned(seed.equipment),
        synonyms: owned(seed.synonyms),
        contraindications: seed
            .contraindications
            .iter()
            .map(|c| (*c).to_owned())
            .collect(),
        macros: None,
        description: seed.description.to_owned(),
    });

    let meals = MEALS.iter().map(|seed| {
        let (calories, protein_g, carbs_g, fat_g) = seed.macros;
        CatalogItem {
            id: seed.id.to_owned(),
            name: seed.name.to_owned(),
            category: ItemCategory::Meal,
            tags: seed.tags.iter().map(|t| (*t).to_owned()).collect(),
            difficulty: 1.0,
            equipment: Vec::new(),
            synonyms: owned(seed.synonyms),
            contraindications: Default::default(),
            macros: Some(Macros {
                calories,
                protein_g,
                carbs_g,
                fat_g,
            }),
            description: seed.description.to_owned(),
        }
    });

    exercises.chain(meals).collect()
}
