use ndarray::prelude::*;
use ndarray_txt::{
    read_txt, write_txt, write_txt_with_format, ReadTxtError, ValueFormat, WriteTxtError,
};

fn write_example() -> Result<(), WriteTxtError> {
    let arr: Array2<i32> = array![[1, 2, 3], [4, 5, 6]];
    write_txt("array.txt", &arr)?;
    write_txt_with_format("array_int.txt", &arr, &ValueFormat::integer())?;
    Ok(())
}

fn read_example() -> Result<(), ReadTxtError> {
    let arr: Array2<f64> = read_txt("array.txt")?;
    println!("arr =\n{}", arr);
    let arr: ArrayD<f64> = read_txt("array_int.txt")?;
    println!("arr (any rank) =\n{}", arr);
    Ok(())
}

fn main() {
    write_example().expect("failure writing array to file");
    read_example().expect("failure reading array from file");
}
