pub const CONTAINER: &str = "min-h-screen bg-gray-50 dark:bg-gray-900 w-full px-4 sm:px-6 lg:px-8 py-8";
pub const CARD: &str = "bg-white dark:bg-gray-800 p-8 rounded-lg shadow-lg dark:shadow-[0_4px_12px_-4px_rgba(255,255,255,0.03)] max-w-2xl mx-auto";
pub const TEXT_H1: &str = "text-3xl font-bold mb-6 text-center text-gray-900 dark:text-white";
pub const TEXT_BODY: &str = "mb-4 text-center text-gray-700 dark:text-gray-300";
pub const SCORE: &str = "mt-4 text-center text-xl text-gray-800 dark:text-gray-200";
pub const BUTTON_PRIMARY: &str = "px-4 py-2 bg-blue-500 text-white rounded hover:bg-blue-600 transition-colors";
pub const GAME_OVER: &str = "absolute inset-0 flex flex-col items-center justify-center rounded-lg bg-white/70 dark:bg-gray-900/70 text-3xl font-bold text-red-500";

pub const BOARD: &str = "relative mx-auto rounded-lg bg-[#bbada0] touch-none select-none";
pub const CELL: &str = "absolute rounded";
pub const TILE: &str = "absolute flex items-center justify-center rounded font-bold";
pub const TILE_NEW: &str = "animate-[appear_200ms_ease-in-out]";
pub const TILE_MERGED: &str = "animate-[pop_200ms_ease-in-out] z-20";
pub const TILE_ABSORBED: &str = "z-0";

pub const CELL_SIZE_PX: u32 = 70;
pub const CELL_GAP_PX: u32 = 10;
pub const EMPTY_CELL_COLOR: &str = "#ccc0b3";

pub fn tile_background(value: u32) -> &'static str {
    match value {
        2 => "#eee4da",
        4 => "#ede0c8",
        8 => "#f2b179",
        16 => "#f59563",
        32 => "#f67c5f",
        64 => "#f65e3b",
        128 => "#edcf72",
        256 => "#edcc61",
        512 => "#edc850",
        1024 => "#edc53f",
        2048 => "#edc22e",
        _ => EMPTY_CELL_COLOR,
    }
}

pub fn tile_text_color(value: u32) -> &'static str {
    if value <= 4 {
        "#776e65"
    } else {
        "#f9f6f2"
    }
}

/// Smaller digits once the value no longer fits the cell at the default size.
pub fn tile_font_class(value: u32) -> &'static str {
    match value {
        0..=64 => "text-3xl",
        65..=512 => "text-2xl",
        513..=8192 => "text-xl",
        _ => "text-base",
    }
}

/// Pixel offset of a cell's top-left corner inside the board.
pub fn cell_offset(index: usize) -> u32 {
    CELL_GAP_PX + index as u32 * (CELL_SIZE_PX + CELL_GAP_PX)
}

pub fn board_size_px(cells: usize) -> u32 {
    cell_offset(cells)
}
